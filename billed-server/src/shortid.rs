use std::fmt;

use harsh::Harsh;
use lazy_static::lazy_static;
use uuid::Uuid;

lazy_static! {
    static ref HARSH: Harsh = Harsh::builder().salt("billed.bills").build().unwrap();
}

/// Store-assigned identifier, rendered as a compact alphanumeric string
/// derived from a random UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortId(Uuid);

impl ShortId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShortId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ShortId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.as_u128();
        f.write_str(&HARSH.encode(&[n as u64, (n >> 64) as u64]))
    }
}
