/*!
This crate holds the state of the heart disease prediction form. A [`FormState`] holds one value for each of the thirteen clinical [`Field`]s. Every edit produces a new state, and [`FormState::finalize`] turns a state into the fully numeric [`RequestPayload`] that is sent to the prediction service.

```
use cardioguard_form::{Field, FieldValue, FormState};

let state = FormState::new().edit("age", "63").unwrap().edit("chol", "").unwrap();
assert_eq!(state.get(Field::Chol), FieldValue::Empty);
let payload = state.finalize();
assert_eq!(payload.age, 63);
assert_eq!(payload.chol, 0);
```
*/

mod field;
mod payload;
mod state;

pub use self::field::{Choice, Field, FieldKind, ParseFieldError};
pub use self::payload::{OutOfRange, RequestPayload, ValidationError};
pub use self::state::{EditError, FieldValue, FormState};
pub use cardioguard_util::number::Parsing;
