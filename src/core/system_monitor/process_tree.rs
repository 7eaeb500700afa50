//! Descendant resolution for a single process.
//!
//! Despite the name, the result is flat: the resolved process plus every
//! descendant (children, grandchildren, ...) as one list of labels.

use super::metrics::ProcessSample;
use crate::error::{ProcIntelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// A process and all of its descendants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTree {
    pub parent: String,
    pub children: Vec<String>,
}

/// Wire shape of a tree lookup: the tree, or `{"error": ...}` when the pid is gone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeLookup {
    Found(ProcessTree),
    NotFound { error: String },
}

impl From<Result<ProcessTree>> for TreeLookup {
    fn from(result: Result<ProcessTree>) -> Self {
        match result {
            Ok(tree) => TreeLookup::Found(tree),
            Err(e) => TreeLookup::NotFound {
                error: e.to_string(),
            },
        }
    }
}

/// `name (pid)`
pub fn label(sample: &ProcessSample) -> String {
    format!("{} ({})", sample.name, sample.pid)
}

/// Resolve `pid` and list its descendants breadth-first, siblings in pid order.
///
/// Fails with [`ProcIntelError::ProcessNotFound`] when no sample has that pid.
pub fn resolve_tree(samples: &[ProcessSample], pid: u32) -> Result<ProcessTree> {
    let root = samples
        .iter()
        .find(|sample| sample.pid == pid)
        .ok_or(ProcIntelError::ProcessNotFound(pid))?;

    // Group processes by parent PID
    let mut children_map: HashMap<u32, Vec<&ProcessSample>> = HashMap::new();
    for sample in samples {
        if let Some(ppid) = sample.parent_pid {
            if ppid != sample.pid {
                children_map.entry(ppid).or_default().push(sample);
            }
        }
    }
    for children in children_map.values_mut() {
        children.sort_by_key(|child| child.pid);
    }

    // Pid reuse can make parent links form a cycle; visit each pid once
    let mut visited = HashSet::from([root.pid]);
    let mut queue = VecDeque::from([root.pid]);
    let mut descendants = Vec::new();

    while let Some(current) = queue.pop_front() {
        let Some(children) = children_map.get(&current) else {
            continue;
        };
        for child in children {
            if visited.insert(child.pid) {
                descendants.push(label(child));
                queue.push_back(child.pid);
            }
        }
    }

    Ok(ProcessTree {
        parent: label(root),
        children: descendants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(pid: u32, parent_pid: Option<u32>, name: &str) -> ProcessSample {
        ProcessSample {
            pid,
            parent_pid,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn family() -> Vec<ProcessSample> {
        vec![
            process(1, None, "init"),
            process(10, Some(1), "sshd"),
            process(22, Some(10), "bash"),
            process(21, Some(10), "bash"),
            process(30, Some(22), "vim"),
            process(40, Some(1), "cron"),
        ]
    }

    #[test]
    fn test_descendants_are_flattened() {
        let tree = resolve_tree(&family(), 10).unwrap();

        assert_eq!(tree.parent, "sshd (10)");
        assert_eq!(tree.children, vec!["bash (21)", "bash (22)", "vim (30)"]);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let tree = resolve_tree(&family(), 30).unwrap();
        assert_eq!(tree.parent, "vim (30)");
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_unknown_pid_is_not_found() {
        let err = resolve_tree(&family(), 999).unwrap_err();
        assert!(matches!(err, ProcIntelError::ProcessNotFound(999)));
    }

    #[test]
    fn test_cycle_terminates() {
        let samples = vec![process(5, Some(6), "a"), process(6, Some(5), "b")];

        let tree = resolve_tree(&samples, 5).unwrap();
        assert_eq!(tree.children, vec!["b (6)"]);
    }

    #[test]
    fn test_lookup_wire_shapes() {
        let found = TreeLookup::from(resolve_tree(&family(), 22));
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({"parent": "bash (22)", "children": ["vim (30)"]})
        );

        let missing = TreeLookup::from(resolve_tree(&family(), 77));
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            serde_json::json!({"error": "No process with PID 77"})
        );
    }
}
