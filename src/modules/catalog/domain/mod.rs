pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{
    Anime, CatalogRecord, ChildRecord, ContentSource, EntityKind, Episode, Genre, Movie, Season,
    SlugKeyed,
};
pub use repositories::{RemoteQuery, RemoteStore};
pub use value_objects::NamedList;
