//! Collision-free markers for lowered operations.

use uuid::Uuid;

/// Produces a fresh identifier per synthesized operation.
pub trait NameGenerator {
    fn next(&mut self, kind: &str) -> String;
}

/// `<kind>_<uuid>`; unique across runs.
#[derive(Debug, Default)]
pub struct UuidNames;

impl NameGenerator for UuidNames {
    fn next(&mut self, kind: &str) -> String {
        format!("{kind}_{}", Uuid::new_v4().simple())
    }
}

/// `<kind>_<n>`; unique within one generator, reproducible across runs.
#[derive(Debug, Default)]
pub struct SequentialNames {
    count: u64,
}

impl NameGenerator for SequentialNames {
    fn next(&mut self, kind: &str) -> String {
        let name = format!("{kind}_{}", self.count);
        self.count += 1;
        name
    }
}
