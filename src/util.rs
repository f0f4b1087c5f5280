use std::{convert::TryFrom as _, num::TryFromIntError};

pub(crate) fn out_of_range_error() -> TryFromIntError {
    // TryFromIntError has no public constructor, so take one from a
    // conversion that cannot succeed.
    u32::try_from(u64::MAX).unwrap_err()
}
