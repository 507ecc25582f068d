pub mod dictionary;
pub mod lookup;
pub mod normalize;
pub mod query;
pub mod resolve;
pub mod service;
pub mod store;

pub use dictionary::{Dictionary, DictionaryEntry, DictionaryLoader, LoadError};
pub use lookup::{Lookup, NOT_FOUND};
pub use normalize::{Normalizer, TextNormalizer, normalize};
pub use resolve::{MatchKind, Resolution, resolve};
pub use service::{ServiceOptions, TranslationService};
pub use store::{DictionarySource, DictionaryStore, ReloadPolicy};
