use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn parse(value: i32) -> Result<Rating, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as i16))
        } else {
            Err(format!("Rating must be between {} and {}", Self::MIN, Self::MAX))
        }
    }

    pub fn inner(&self) -> i16 {
        self.0
    }
}
