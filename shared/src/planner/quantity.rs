//! Default plant quantities scaled to garden size

/// Per-crop sizing rule: `base + garden_size_m2 * per_m2`, capped at `max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityRule {
    pub base: f64,
    pub per_m2: f64,
    pub max: u32,
}

const MIN_QUANTITY: u32 = 2;

const QUANTITY_RULES: &[(&str, QuantityRule)] = &[
    ("Potatis", QuantityRule { base: 10.0, per_m2: 0.4, max: 40 }),
    ("Morötter", QuantityRule { base: 15.0, per_m2: 0.6, max: 60 }),
    ("Lök", QuantityRule { base: 12.0, per_m2: 0.5, max: 50 }),
    ("Vitkål", QuantityRule { base: 3.0, per_m2: 0.1, max: 12 }),
    ("Bondbönor", QuantityRule { base: 8.0, per_m2: 0.3, max: 30 }),
    ("Ärtor", QuantityRule { base: 8.0, per_m2: 0.3, max: 30 }),
    ("Rödbetor", QuantityRule { base: 10.0, per_m2: 0.4, max: 40 }),
    ("Grönkål", QuantityRule { base: 3.0, per_m2: 0.1, max: 10 }),
    ("Tomater", QuantityRule { base: 3.0, per_m2: 0.1, max: 10 }),
    ("Sallad", QuantityRule { base: 6.0, per_m2: 0.2, max: 20 }),
    ("Vitlök", QuantityRule { base: 10.0, per_m2: 0.3, max: 30 }),
    ("Squash", QuantityRule { base: 1.0, per_m2: 0.05, max: 4 }),
];

/// Sizing rule for a known crop name
pub fn quantity_rule(crop_name: &str) -> Option<QuantityRule> {
    QUANTITY_RULES
        .iter()
        .find(|(name, _)| *name == crop_name)
        .map(|(_, rule)| *rule)
}

/// Default plant count for a crop in a garden of the given size.
///
/// Known crops use their [`QuantityRule`] clamped to `[2, max]`; unknown crops
/// get `garden_size_m2 / 5` clamped to `[3, 10]`.
pub fn default_quantity(crop_name: &str, garden_size_m2: f64) -> u32 {
    let garden = if garden_size_m2.is_finite() {
        garden_size_m2.max(0.0)
    } else {
        0.0
    };

    match quantity_rule(crop_name) {
        Some(rule) => {
            let raw = (rule.base + garden * rule.per_m2).floor();
            clamp_count(raw, MIN_QUANTITY, rule.max.max(MIN_QUANTITY))
        }
        None => clamp_count((garden / 5.0).floor(), 3, 10),
    }
}

fn clamp_count(raw: f64, min: u32, max: u32) -> u32 {
    if raw <= f64::from(min) {
        min
    } else if raw >= f64::from(max) {
        max
    } else {
        raw as u32
    }
}
