use crate::domain::model::{DuplicatePolicy, OrbitRecord};
use crate::utils::error::{Result, SurveyError};
use std::collections::{HashMap, HashSet};

pub const ROOT_BODY: &str = "COM";

/// Immutable orbit tree: every body maps to the single body it orbits. Built
/// once from the full map, then queried read-only.
#[derive(Debug, Clone)]
pub struct OrbitGraph {
    parents: HashMap<String, String>,
    bodies: HashSet<String>,
}

impl OrbitGraph {
    /// Parses one map line into a record. Lines are trimmed first; exactly one
    /// `)` separator with a non-empty name on each side is accepted.
    pub fn parse_line(line: &str, line_no: usize) -> Result<OrbitRecord> {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(3, ')');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(parent), Some(child), None) if !parent.is_empty() && !child.is_empty() => {
                Ok(OrbitRecord::new(parent, child))
            }
            _ => Err(SurveyError::ParseError {
                line: line_no,
                content: trimmed.to_string(),
            }),
        }
    }

    /// Parses a whole map, skipping blank lines. Line numbers are 1-based and
    /// count every input line so parse errors point at the real file location.
    pub fn parse_lines(input: &str) -> Result<Vec<OrbitRecord>> {
        let mut records = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(Self::parse_line(line, idx + 1)?);
        }
        Ok(records)
    }

    pub fn from_records(records: &[OrbitRecord], policy: DuplicatePolicy) -> Result<Self> {
        let mut parents = HashMap::with_capacity(records.len());
        let mut bodies = HashSet::with_capacity(records.len() * 2);

        for record in records {
            if let Some(existing) = parents.get(&record.child) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(SurveyError::MalformedGraph {
                            message: format!(
                                "body {:?} orbits both {:?} and {:?}",
                                record.child, existing, record.parent
                            ),
                        });
                    }
                    DuplicatePolicy::Overwrite => {
                        tracing::warn!(
                            "Body {:?} reassigned from {:?} to {:?} (last record wins)",
                            record.child,
                            existing,
                            record.parent
                        );
                    }
                }
            }
            parents.insert(record.child.clone(), record.parent.clone());
            bodies.insert(record.child.clone());
            bodies.insert(record.parent.clone());
        }

        Ok(Self { parents, bodies })
    }

    pub fn from_map(input: &str, policy: DuplicatePolicy) -> Result<Self> {
        let records = Self::parse_lines(input)?;
        Self::from_records(&records, policy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains(name)
    }

    pub fn parent(&self, name: &str) -> Option<&str> {
        self.parents.get(name).map(String::as_str)
    }

    /// Number of distinct bodies, roots included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Re-emits the graph as orbit records, for round-tripping. Order is
    /// unspecified; rebuilding from these records yields an identical graph.
    pub fn records(&self) -> impl Iterator<Item = OrbitRecord> + '_ {
        self.parents
            .iter()
            .map(|(child, parent)| OrbitRecord::new(parent.clone(), child.clone()))
    }

    /// Checks the tree invariants: exactly one root and no cycles. Errors with
    /// `MalformedGraph` on a forest or missing root, `CycleDetected` on loops.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let roots: Vec<&str> = self
            .bodies
            .iter()
            .filter(|b| !self.parents.contains_key(*b))
            .map(String::as_str)
            .collect();

        match roots.len() {
            1 => {}
            0 => {
                // Every body has a parent, so some chain must loop.
                let first = self.parents.keys().next().map(String::clone).unwrap_or_default();
                return Err(SurveyError::CycleDetected { name: first });
            }
            _ => {
                let mut names: Vec<&str> = roots.clone();
                names.sort_unstable();
                return Err(SurveyError::MalformedGraph {
                    message: format!("multiple roots: {}", names.join(", ")),
                });
            }
        }

        // Walking every chain also proves acyclicity.
        for body in self.parents.keys() {
            self.ancestors(body)?;
        }

        Ok(())
    }

    /// Path from `name`'s direct parent up to the root, nearest first. The
    /// root itself has an empty chain. Iterative, with a visited set so that
    /// cyclic input fails instead of recursing forever.
    pub fn ancestors(&self, name: &str) -> Result<Vec<&str>> {
        if !self.contains(name) {
            return Err(SurveyError::UnknownNode {
                name: name.to_string(),
            });
        }

        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(name);

        let mut current = name;
        while let Some(parent) = self.parent(current) {
            if !visited.insert(parent) {
                return Err(SurveyError::CycleDetected {
                    name: parent.to_string(),
                });
            }
            chain.push(parent);
            current = parent;
        }

        Ok(chain)
    }

    /// Orbit count checksum: the sum of every body's ancestor-chain length.
    /// Depths are memoized so shared prefixes are walked once, keeping this
    /// O(n) on deep maps.
    pub fn total_orbits(&self) -> Result<u64> {
        let mut depths: HashMap<&str, u64> = HashMap::with_capacity(self.bodies.len());
        let mut total = 0u64;

        for body in self.parents.keys() {
            total += self.depth_memoized(body, &mut depths)?;
        }

        Ok(total)
    }

    fn depth_memoized<'a>(
        &'a self,
        body: &'a str,
        depths: &mut HashMap<&'a str, u64>,
    ) -> Result<u64> {
        if let Some(depth) = depths.get(body) {
            return Ok(*depth);
        }

        // Walk up until we hit a memoized body or a root, then unwind.
        let mut stack = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = body;

        let mut base = loop {
            if let Some(depth) = depths.get(current) {
                break *depth;
            }
            if !visited.insert(current) {
                return Err(SurveyError::CycleDetected {
                    name: current.to_string(),
                });
            }
            match self.parent(current) {
                Some(parent) => {
                    stack.push(current);
                    current = parent;
                }
                None => {
                    depths.insert(current, 0);
                    break 0;
                }
            }
        };

        while let Some(body) = stack.pop() {
            base += 1;
            depths.insert(body, base);
        }

        Ok(base)
    }

    /// Minimum number of orbital transfers between the object `origin` orbits
    /// and the object `destination` orbits, via their nearest common ancestor.
    /// Found by intersecting the two ancestor chains and minimizing the
    /// combined hop count; chains are short, so a linear scan is enough.
    pub fn transfer_distance(&self, origin: &str, destination: &str) -> Result<u32> {
        let origin_chain = self.ancestors(origin)?;
        let dest_chain = self.ancestors(destination)?;

        let dest_index: HashMap<&str, usize> = dest_chain
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();

        origin_chain
            .iter()
            .enumerate()
            .filter_map(|(i, name)| dest_index.get(name).map(|j| (i + j) as u32))
            .min()
            .ok_or_else(|| SurveyError::NoCommonAncestor {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SurveyError;

    const SAMPLE_MAP: &str = "COM)B\nB)C\nC)D\nD)E\nE)F\nB)G\nG)H\nD)I\nE)J\nJ)K\nK)L";

    fn sample_graph() -> OrbitGraph {
        OrbitGraph::from_map(SAMPLE_MAP, DuplicatePolicy::default()).unwrap()
    }

    fn sample_graph_with_travelers() -> OrbitGraph {
        let map = format!("{}\nK)YOU\nI)SAN", SAMPLE_MAP);
        OrbitGraph::from_map(&map, DuplicatePolicy::default()).unwrap()
    }

    #[test]
    fn test_parse_line_accepts_valid_record() {
        let record = OrbitGraph::parse_line("COM)B", 1).unwrap();
        assert_eq!(record, OrbitRecord::new("COM", "B"));
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let record = OrbitGraph::parse_line("  AAA)BBB  \n", 4).unwrap();
        assert_eq!(record, OrbitRecord::new("AAA", "BBB"));
    }

    #[test]
    fn test_parse_line_rejects_malformed_records() {
        for bad in ["COM", "COM)", ")B", "A)B)C", ""] {
            let err = OrbitGraph::parse_line(bad, 9).unwrap_err();
            match err {
                SurveyError::ParseError { line, .. } => assert_eq!(line, 9),
                other => panic!("expected ParseError, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_lines_skips_blank_lines_and_numbers_errors() {
        let records = OrbitGraph::parse_lines("COM)B\n\nB)C\n").unwrap();
        assert_eq!(records.len(), 2);

        let err = OrbitGraph::parse_lines("COM)B\n\nnot-a-record").unwrap_err();
        match err {
            SurveyError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_checksum_matches_canonical_example() {
        assert_eq!(sample_graph().total_orbits().unwrap(), 42);
    }

    #[test]
    fn test_checksum_equals_sum_of_depths() {
        let graph = sample_graph_with_travelers();
        let mut sum = 0u64;
        for body in ["B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "YOU", "SAN"] {
            sum += graph.ancestors(body).unwrap().len() as u64;
        }
        assert_eq!(graph.total_orbits().unwrap(), sum);
    }

    #[test]
    fn test_checksum_zero_for_empty_map() {
        let graph = OrbitGraph::from_map("", DuplicatePolicy::default()).unwrap();
        assert_eq!(graph.total_orbits().unwrap(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_ancestors_of_root_is_empty() {
        assert!(sample_graph().ancestors(ROOT_BODY).unwrap().is_empty());
    }

    #[test]
    fn test_ancestors_ordered_nearest_first() {
        let graph = sample_graph();
        assert_eq!(graph.ancestors("L").unwrap(), vec!["K", "J", "E", "D", "C", "B", "COM"]);
    }

    #[test]
    fn test_ancestors_unknown_body() {
        let err = sample_graph().ancestors("XYZ").unwrap_err();
        assert!(matches!(err, SurveyError::UnknownNode { .. }));
    }

    #[test]
    fn test_transfer_distance_matches_canonical_example() {
        let graph = sample_graph_with_travelers();
        assert_eq!(graph.transfer_distance("YOU", "SAN").unwrap(), 4);
    }

    #[test]
    fn test_transfer_distance_is_symmetric() {
        let graph = sample_graph_with_travelers();
        assert_eq!(
            graph.transfer_distance("YOU", "SAN").unwrap(),
            graph.transfer_distance("SAN", "YOU").unwrap()
        );
    }

    #[test]
    fn test_transfer_distance_zero_between_siblings_of_same_parent() {
        // F and J both orbit E, so no transfers are needed.
        let graph = sample_graph();
        assert_eq!(graph.transfer_distance("F", "J").unwrap(), 0);
    }

    #[test]
    fn test_transfer_distance_unknown_body() {
        let graph = sample_graph();
        assert!(matches!(
            graph.transfer_distance("YOU", "B").unwrap_err(),
            SurveyError::UnknownNode { .. }
        ));
        assert!(matches!(
            graph.transfer_distance("B", "SAN").unwrap_err(),
            SurveyError::UnknownNode { .. }
        ));
    }

    #[test]
    fn test_transfer_distance_disconnected_trees() {
        // Two roots; queries across them have no common ancestor.
        let graph =
            OrbitGraph::from_map("COM)A\nXXX)B", DuplicatePolicy::default()).unwrap();
        assert!(matches!(
            graph.transfer_distance("A", "B").unwrap_err(),
            SurveyError::NoCommonAncestor { .. }
        ));
    }

    #[test]
    fn test_duplicate_child_rejected_under_reject_policy() {
        let err =
            OrbitGraph::from_map("COM)B\nCOM)C\nD)C", DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, SurveyError::MalformedGraph { .. }));
    }

    #[test]
    fn test_duplicate_child_last_record_wins_under_overwrite_policy() {
        let graph =
            OrbitGraph::from_map("COM)B\nCOM)C\nB)C", DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(graph.parent("C"), Some("B"));
        assert_eq!(graph.ancestors("C").unwrap(), vec!["B", "COM"]);
    }

    #[test]
    fn test_cycle_detected_instead_of_looping() {
        let graph = OrbitGraph::from_map("A)B\nB)C\nC)A", DuplicatePolicy::default()).unwrap();
        assert!(matches!(
            graph.ancestors("B").unwrap_err(),
            SurveyError::CycleDetected { .. }
        ));
        assert!(matches!(
            graph.total_orbits().unwrap_err(),
            SurveyError::CycleDetected { .. }
        ));
        assert!(matches!(
            graph.validate().unwrap_err(),
            SurveyError::CycleDetected { .. }
        ));
    }

    #[test]
    fn test_validate_accepts_single_rooted_tree() {
        assert!(sample_graph().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_forest() {
        let graph =
            OrbitGraph::from_map("COM)A\nXXX)B", DuplicatePolicy::default()).unwrap();
        match graph.validate().unwrap_err() {
            SurveyError::MalformedGraph { message } => {
                assert!(message.contains("multiple roots"));
            }
            other => panic!("expected MalformedGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_preserves_checksum() {
        let graph = sample_graph_with_travelers();
        let records: Vec<OrbitRecord> = graph.records().collect();
        let rebuilt = OrbitGraph::from_records(&records, DuplicatePolicy::Reject).unwrap();
        assert_eq!(rebuilt.total_orbits().unwrap(), graph.total_orbits().unwrap());
        assert_eq!(rebuilt.body_count(), graph.body_count());
    }

    #[test]
    fn test_body_count_includes_root() {
        // 11 records, 12 distinct bodies (COM plus B..L).
        assert_eq!(sample_graph().body_count(), 12);
    }
}
