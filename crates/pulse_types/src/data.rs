use serde::{Deserialize, Serialize};

/// Wire shape of the published heart-rate estimate.
///
/// `bpm` is zero until the smoothing window holds at least one accepted
/// beat, which consumers render as "no stable estimate yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmUpdate {
    pub bpm: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bpm_update_serializes_to_single_field_object() {
        let json = serde_json::to_string(&BpmUpdate { bpm: 72 }).unwrap();
        assert_eq!(json, r#"{"bpm":72}"#);
    }

    #[test]
    fn default_means_no_estimate() {
        assert_eq!(BpmUpdate::default().bpm, 0);
    }
}
