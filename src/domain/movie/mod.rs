pub mod entity;
pub mod invariants;

pub use entity::{
    title_key, Certification, Movie, MovieFilter, MoviePatch, MovieStatus, NewMovie, DEFAULT_GENRE,
};
pub use invariants::{validate_duration, validate_movie_patch, validate_new_movie, validate_title};
