//! Offer/section builder.
//!
//! Composes draft sections for one subject and derives the flat batch of
//! creation requests submitted to the scheduling service.

mod draft;
mod offer;

pub use draft::{DraftSection, SectionCreationRequest, SessionCounts};
pub use offer::OfferBuilder;
