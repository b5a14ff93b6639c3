//! Case validation logic.
//!
//! Checks the file on its own terms (supported version, names, finite numbers,
//! parameter ranges). Physical consistency such as `xb < xf < xd` is left to
//! [`mt_column::ColumnSpec::validate`].

use crate::schema::Case;
use mt_core::ensure_fraction;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    for (field, component) in [("light", &case.light), ("heavy", &case.heavy)] {
        if component.name.trim().is_empty() {
            return Err(invalid(&format!("{field}.name"), "\"\"", "must not be empty"));
        }
        let p = component.vapor_pressure_kpa;
        if !p.is_finite() || p <= 0.0 {
            return Err(invalid(
                &format!("{field}.vapor_pressure_kpa"),
                p,
                "must be positive and finite",
            ));
        }
    }

    for (field, value) in [
        ("feed.composition", case.feed.composition),
        ("distillate_composition", case.distillate_composition),
        ("bottoms_composition", case.bottoms_composition),
    ] {
        ensure_fraction(value, "composition")
            .map_err(|_| invalid(field, value, "must be a mole fraction in [0, 1]"))?;
    }

    if !case.feed.q.is_finite() {
        return Err(invalid("feed.q", case.feed.q, "must be finite"));
    }

    let eta = case.murphree_efficiency;
    if !eta.is_finite() || eta <= 0.0 || eta > 1.0 {
        return Err(invalid("murphree_efficiency", eta, "must lie in (0, 1]"));
    }

    let factor = case.reflux_factor;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(invalid("reflux_factor", factor, "must be positive and finite"));
    }

    if case.staging.max_stages == 0 {
        return Err(invalid("staging.max_stages", 0, "must be at least 1"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComponentDef, FeedDef};
    use mt_column::StagingConfig;

    fn case() -> Case {
        Case {
            version: 1,
            name: "Benzene / toluene".to_string(),
            light: ComponentDef {
                name: "benzene".to_string(),
                vapor_pressure_kpa: 179.2,
            },
            heavy: ComponentDef {
                name: "toluene".to_string(),
                vapor_pressure_kpa: 74.3,
            },
            feed: FeedDef {
                composition: 0.5,
                q: 0.5,
            },
            distillate_composition: 0.975,
            bottoms_composition: 0.025,
            reflux_factor: 1.3,
            murphree_efficiency: 0.75,
            staging: StagingConfig::default(),
        }
    }

    #[test]
    fn valid_case_passes() {
        validate_case(&case()).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let mut c = case();
        c.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_case(&c),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn empty_component_name_rejected() {
        let mut c = case();
        c.heavy.name = "  ".to_string();
        let err = validate_case(&c).unwrap_err();
        assert!(err.to_string().contains("heavy.name"));
    }

    #[test]
    fn bad_numbers_are_named() {
        let mut c = case();
        c.light.vapor_pressure_kpa = -3.0;
        assert!(validate_case(&c).unwrap_err().to_string().contains("light.vapor_pressure_kpa"));

        let mut c = case();
        c.feed.composition = 1.5;
        assert!(validate_case(&c).unwrap_err().to_string().contains("feed.composition"));

        let mut c = case();
        c.murphree_efficiency = 0.0;
        assert!(validate_case(&c).unwrap_err().to_string().contains("murphree_efficiency"));

        let mut c = case();
        c.feed.q = f64::NAN;
        assert!(validate_case(&c).unwrap_err().to_string().contains("feed.q"));

        let mut c = case();
        c.staging.max_stages = 0;
        assert!(validate_case(&c).unwrap_err().to_string().contains("max_stages"));
    }

    #[test]
    fn physical_checks_happen_on_conversion() {
        // valid as a file, but xb > xf
        let mut c = case();
        c.bottoms_composition = 0.6;
        validate_case(&c).unwrap();
        assert!(matches!(
            c.to_column_spec(),
            Err(crate::CaseError::Column(_))
        ));
    }

    #[test]
    fn conversion_derives_relative_volatility() {
        let spec = case().to_column_spec().unwrap();
        assert!((spec.relative_volatility - 179.2 / 74.3).abs() < 1e-12);
        assert_eq!(spec.feed_quality, 0.5);
        assert_eq!(spec.murphree_efficiency, 0.75);
    }
}
