use crate::workflows::credit::record::CompanyRecord;
use serde::de::Error as _;
use serde_json::Value;
use std::io::Read;

/// Snapshots are normally wrapped as `{ "data": [...] }`; a bare array is accepted too.
pub(crate) fn parse_snapshot<R: Read>(reader: R) -> Result<Vec<CompanyRecord>, serde_json::Error> {
    let companies = match serde_json::from_reader::<_, Value>(reader)? {
        Value::Object(mut envelope) => envelope
            .remove("data")
            .ok_or_else(|| serde_json::Error::missing_field("data"))?,
        companies @ Value::Array(_) => companies,
        _ => {
            return Err(serde_json::Error::custom(
                "expected a `data` envelope or an array of companies",
            ))
        }
    };
    serde_json::from_value(companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_and_bare_snapshots() {
        let wrapped = r#"{ "data": [ { "companyName": "Acme", "organizationId": "org-1" } ] }"#;
        let bare = r#"[ { "companyName": "Acme", "organizationId": "org-1" } ]"#;

        let from_wrapped = parse_snapshot(wrapped.as_bytes()).expect("wrapped parses");
        let from_bare = parse_snapshot(bare.as_bytes()).expect("bare parses");

        assert_eq!(from_wrapped, from_bare);
        assert_eq!(from_wrapped[0].organization_id, "org-1");
    }

    #[test]
    fn envelope_without_data_is_rejected() {
        let err = parse_snapshot(r#"{ "Data": [] }"#.as_bytes()).expect_err("missing data");
        assert!(err.to_string().contains("missing field `data`"));
    }

    #[test]
    fn company_errors_keep_the_field_message() {
        let snapshot = r#"{ "data": [ { "companyName": "Acme", "financialStatement": "n/a" } ] }"#;

        let err = parse_snapshot(snapshot.as_bytes()).expect_err("bad statements");
        let message = err.to_string();
        assert!(message.contains("invalid type"), "{message}");
        assert!(!message.contains("did not match any variant"));
    }

    #[test]
    fn scalar_snapshot_is_rejected() {
        assert!(parse_snapshot("42".as_bytes()).is_err());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_snapshot("{ data: ".as_bytes()).is_err());
    }
}
