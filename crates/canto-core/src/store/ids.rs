use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Millisecond-timestamp ids, strictly increasing within one generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let id = now_millis().max(self.last + 1);
        self.last = id;
        id.to_string()
    }
}

fn now_millis() -> u64 {
    let ms = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(ms).unwrap_or(0)
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

pub fn today() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase() {
        let mut ids = IdGenerator::new();
        let a: u64 = ids.next_id().parse().unwrap();
        let b: u64 = ids.next_id().parse().unwrap();
        let c: u64 = ids.next_id().parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn date_formats() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert_eq!(&d[4..5], "-");
        assert!(now_rfc3339().contains('T'));
    }
}
