use crate::workflows::credit::domain::BureauParameter;
use std::collections::HashMap;
use std::sync::OnceLock;

static BUREAU_PARAMETER_MAP: OnceLock<HashMap<&'static str, BureauParameter>> = OnceLock::new();

/// Exact, case-sensitive lookup of a bureau rule name.
pub(crate) fn parameter_for(name: &str) -> Option<BureauParameter> {
    bureau_parameter_map().get(name).copied()
}

fn bureau_parameter_map() -> &'static HashMap<&'static str, BureauParameter> {
    BUREAU_PARAMETER_MAP.get_or_init(|| {
        BureauParameter::ordered()
            .into_iter()
            .map(|parameter| (parameter.label(), parameter))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_resolve() {
        assert_eq!(parameter_for("Days Past Due"), Some(BureauParameter::Dpd));
        assert_eq!(
            parameter_for("Bounced Cheques"),
            Some(BureauParameter::BouncedCheques)
        );
        assert_eq!(
            parameter_for("Unsettled Defaults"),
            Some(BureauParameter::UnsettledDefaults)
        );
        assert_eq!(parameter_for("Court Cases"), Some(BureauParameter::CourtCases));
    }

    #[test]
    fn near_misses_do_not_resolve() {
        assert_eq!(parameter_for("days past due"), None);
        assert_eq!(parameter_for("Days Past Due "), None);
        assert_eq!(parameter_for("Bounced Cheque"), None);
    }
}
