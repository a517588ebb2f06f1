pub mod form;
pub mod model;
pub mod store;
pub mod time;

pub use form::{EventForm, EventSubmission, FormError};
pub use model::{Event, EventDraft, EventWithOrganizer, Organizer};
pub use store::{EventStore, PgEventStore};
pub use time::{compose, validate_submission, DateTimeInput, EventInterval, SelectionState, SubmissionError};
