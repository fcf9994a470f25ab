pub mod contact;
pub mod ids;
pub mod name;
pub mod phone;

pub use contact::{Contact, ContactDraft, Field};
pub use ids::ContactId;
pub use name::{matches_name_shape, normalize_name_for_match};
pub use phone::matches_phone_shape;
