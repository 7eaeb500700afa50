use serde::{Deserialize, Serialize};

use super::metrics::{ProcessSample, ProcessState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMatch {
    pub pid: u32,
    pub name: String,
    pub status: ProcessState,
}

/// Processes whose name contains `needle`, ignoring case, ordered by pid.
///
/// Plain substring match: no anchoring, no wildcards. An empty needle matches everything.
pub fn find_by_name(samples: &[ProcessSample], needle: &str) -> Vec<ProcessMatch> {
    let needle = needle.to_lowercase();

    let mut matches: Vec<ProcessMatch> = samples
        .iter()
        .filter(|sample| sample.name.to_lowercase().contains(&needle))
        .map(|sample| ProcessMatch {
            pid: sample.pid,
            name: sample.name.clone(),
            status: sample.status,
        })
        .collect();

    matches.sort_by_key(|m| m.pid);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<ProcessSample> {
        [(30, "Firefox"), (12, "firefox-helper"), (7, "sshd"), (44, "bash")]
            .into_iter()
            .map(|(pid, name)| ProcessSample {
                pid,
                name: name.to_string(),
                status: ProcessState::Sleeping,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let found = find_by_name(&samples(), "fire");
        let pids: Vec<u32> = found.iter().map(|m| m.pid).collect();
        assert_eq!(pids, vec![12, 30]);
    }

    #[test]
    fn test_symmetric_under_case() {
        let lower = find_by_name(&samples(), "firefox");
        let upper = find_by_name(&samples(), "FIREFOX");
        let mixed = find_by_name(&samples(), "FiReFoX");
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_empty_matches_everything() {
        assert_eq!(find_by_name(&samples(), "").len(), 4);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(find_by_name(&samples(), "postgres").is_empty());
    }

    #[test]
    fn test_no_wildcards() {
        assert!(find_by_name(&samples(), "fire*").is_empty());
        assert!(find_by_name(&samples(), "^bash").is_empty());
    }

    #[test]
    fn test_match_shape() {
        let found = find_by_name(&samples(), "sshd");
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"pid": 7, "name": "sshd", "status": "sleeping"})
        );
    }
}
