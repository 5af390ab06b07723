/*!
Small building blocks shared by the cardioguard crates: a float wrapper that is guaranteed to be finite, and the permissive number parsing used when coercing form input.
*/

pub mod finite;
pub mod number;
