use crate::domain::ports::EntryKind;
use chrono::{DateTime, Utc};

/// Hands out `<prefix>_<millis>` identifiers that never repeat within a process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: EntryKind, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        // 同一毫秒內多次呼叫時往後推
        if millis <= self.last_millis {
            millis = self.last_millis + 1;
        }
        self.last_millis = millis;
        format!("{}_{}", kind.prefix(), millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_prefixed_and_unique_within_same_millisecond() {
        let now = Utc::now();
        let mut ids = IdGenerator::new();

        let a = ids.next(EntryKind::Experience, now);
        let b = ids.next(EntryKind::Experience, now);
        let c = ids.next(EntryKind::Skill, now);

        assert!(a.starts_with("exp_"));
        assert!(c.starts_with("skill_"));
        assert_ne!(a, b);
        assert_eq!(a, format!("exp_{}", now.timestamp_millis()));
        assert_eq!(b, format!("exp_{}", now.timestamp_millis() + 1));
    }

    #[test]
    fn test_clock_going_backwards_does_not_reuse_ids() {
        let now = Utc::now();
        let mut ids = IdGenerator::new();

        let first = ids.next(EntryKind::Resume, now);
        let second = ids.next(EntryKind::Resume, now - chrono::Duration::seconds(5));
        assert_ne!(first, second);
    }
}
