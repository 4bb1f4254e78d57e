//! # Pagecraft Model
//!
//! Content model shared by every Pagecraft crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Layout { id, slug, sections, versions }     │
//! │   └─ Section { id, type, content, hidden }  │
//! │        └─ content: open JSON object         │
//! └─────────────────────────────────────────────┘
//!                     ↓ decode (lenient)
//! ┌─────────────────────────────────────────────┐
//! │ typed content: HeroContent, ServicesContent │
//! │  - explicit defaults per field              │
//! │  - bad or missing fields fall back          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stored content is open**: unknown fields survive every edit and save
//! 2. **Typed content is a view**: decoded on demand, never the storage form
//! 3. **Unknown types are not errors**: `SectionKind::parse` returns `None`
//! 4. **Versions are append-only**: a snapshot is never rewritten

mod content;
mod error;
mod ids;
mod items;
mod layout;
mod section;
mod store;

pub use content::{
    decode_lenient, Alignment, CallToActionContent, FeatureGridContent, FeatureItem,
    FeatureLayout, HeroContent, RichTextContent, SectionContent, SectionKind, ServiceItem,
    ServicesContent, StatCardsContent, StatItem, TestimonialItem, TestimonialsContent,
    VideoBannerContent,
};
pub use error::ModelError;
pub use ids::{now_millis, unique_id};
pub use items::RepeatableItems;
pub use layout::{Layout, LayoutState, LayoutSummary, NavigationItem, Version};
pub use section::{ContentMap, Section};
pub use store::{
    CacheInvalidation, LayoutStore, MediaUploader, RevertRequest, SaveVersionRequest, StoreError,
    CACHE_INVALIDATE_EVENT,
};
