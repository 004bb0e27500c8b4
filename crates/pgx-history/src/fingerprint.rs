//! Content fingerprints for stored reports.
//!
//! A fingerprint commits to everything in a `Report` except its two
//! timestamps, so two runs over identical input and drugs produce the same
//! value. Every contributing field is listed explicitly.
//!
//! Hash input layout (bytes, in order, each followed by a 0x00 separator):
//!   1. patient_id as UTF-8 bytes
//!   2. drug as UTF-8 bytes
//!   3. canonical JSON of risk_assessment
//!   4. canonical JSON of pharmacogenomic_profile
//!   5. canonical JSON of clinical_recommendation
//!   6. canonical JSON of llm_generated_explanation
//!   7. vcf_parsing_success as a single byte
//!   8. variants_analyzed as 8-byte little-endian
//!   9. pharmacogenomic_variants_found as 8-byte little-endian
//!  10. annotation_completeness as 8-byte little-endian IEEE-754 bits

use sha2::{Digest, Sha256};

use pgx_contracts::{
    error::{PgxError, PgxResult},
    history::HistoryEntry,
    report::Report,
};

/// Compute the SHA-256 fingerprint of `report`.
///
/// Returns a lowercase 64-character hex string.
pub fn fingerprint_report(report: &Report) -> PgxResult<String> {
    let mut hasher = Sha256::new();

    field(&mut hasher, report.patient_id.as_bytes());
    field(&mut hasher, report.drug.as_bytes());
    field(&mut hasher, &canonical(&report.risk_assessment)?);
    field(&mut hasher, &canonical(&report.pharmacogenomic_profile)?);
    field(&mut hasher, &canonical(&report.clinical_recommendation)?);
    field(&mut hasher, &canonical(&report.llm_generated_explanation)?);

    let metrics = &report.quality_metrics;
    field(&mut hasher, &[u8::from(metrics.vcf_parsing_success)]);
    field(&mut hasher, &(metrics.variants_analyzed as u64).to_le_bytes());
    field(&mut hasher, &(metrics.pharmacogenomic_variants_found as u64).to_le_bytes());
    field(&mut hasher, &metrics.annotation_completeness.to_bits().to_le_bytes());

    Ok(hex::encode(hasher.finalize()))
}

/// True when every entry's stored fingerprint matches its report.
///
/// An empty slice is valid.
pub fn verify_entries(entries: &[HistoryEntry]) -> bool {
    entries.iter().all(|entry| {
        fingerprint_report(&entry.report)
            .map(|fp| fp == entry.fingerprint)
            .unwrap_or(false)
    })
}

fn field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update(bytes);
    hasher.update([0u8]);
}

fn canonical<T: serde::Serialize>(value: &T) -> PgxResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| PgxError::HistoryWriteFailed {
        reason: format!("report is not serializable: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use pgx_contracts::risk::RiskLabel;

    use crate::test_support::make_report;

    use super::fingerprint_report;

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = fingerprint_report(&make_report("CODEINE", RiskLabel::Safe)).unwrap();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn timestamps_do_not_affect_fingerprint() {
        let a = make_report("CODEINE", RiskLabel::Safe);
        let mut b = a.clone();
        b.timestamp = a.timestamp + Duration::hours(3);
        b.quality_metrics.timestamp = Utc::now() + Duration::days(1);

        assert_eq!(fingerprint_report(&a).unwrap(), fingerprint_report(&b).unwrap());
    }

    #[test]
    fn content_changes_affect_fingerprint() {
        let a = make_report("CODEINE", RiskLabel::Safe);

        let mut b = a.clone();
        b.patient_id = "PATIENT_999".to_string();
        assert_ne!(fingerprint_report(&a).unwrap(), fingerprint_report(&b).unwrap());

        let mut c = a.clone();
        c.quality_metrics.variants_analyzed += 1;
        assert_ne!(fingerprint_report(&a).unwrap(), fingerprint_report(&c).unwrap());

        let d = make_report("CODEINE", RiskLabel::Toxic);
        assert_ne!(fingerprint_report(&a).unwrap(), fingerprint_report(&d).unwrap());
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let mut a = make_report("CODEINE", RiskLabel::Safe);
        a.patient_id = "AB".to_string();
        a.drug = "C".to_string();
        let mut b = a.clone();
        b.patient_id = "A".to_string();
        b.drug = "BC".to_string();

        assert_ne!(fingerprint_report(&a).unwrap(), fingerprint_report(&b).unwrap());
    }
}
