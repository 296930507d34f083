use super::entity::{MoviePatch, NewMovie};
use crate::domain::{DomainError, DomainResult};

pub const MIN_TITLE_CHARS: usize = 2;
pub const MAX_TITLE_CHARS: usize = 255;
pub const MIN_DURATION: u32 = 1;
pub const MAX_DURATION: u32 = 600;

/// Validates a movie about to be inserted
pub fn validate_new_movie(movie: &NewMovie) -> DomainResult<()> {
    validate_title(&movie.title)?;
    validate_duration(Some(i64::from(movie.duration)))?;
    validate_genre(&movie.genre)?;
    Ok(())
}

/// Validates only the fields a patch supplies
pub fn validate_movie_patch(patch: &MoviePatch) -> DomainResult<()> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(duration) = patch.duration {
        validate_duration(Some(i64::from(duration)))?;
    }
    if let Some(genre) = &patch.genre {
        validate_genre(genre)?;
    }
    Ok(())
}

/// Title must hold 2..=255 characters once trimmed
pub fn validate_title(title: &str) -> DomainResult<()> {
    let chars = title.trim().chars().count();
    if chars < MIN_TITLE_CHARS {
        return Err(DomainError::InvariantViolation(format!(
            "Movie title must be at least {} characters long",
            MIN_TITLE_CHARS
        )));
    }
    if chars > MAX_TITLE_CHARS {
        return Err(DomainError::InvariantViolation(format!(
            "Movie title cannot exceed {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

/// Duration is required and must lie in 1..=600 minutes
pub fn validate_duration(duration: Option<i64>) -> DomainResult<u32> {
    match duration {
        Some(minutes)
            if (i64::from(MIN_DURATION)..=i64::from(MAX_DURATION)).contains(&minutes) =>
        {
            Ok(minutes as u32)
        }
        _ => Err(DomainError::InvariantViolation(format!(
            "Duration must be between {} and {} minutes",
            MIN_DURATION, MAX_DURATION
        ))),
    }
}

fn validate_genre(genre: &str) -> DomainResult<()> {
    if genre.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Genre cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. Title is trimmed, 2..=255 characters, unique ignoring case
/// 2. Duration is between 1 and 600 minutes
/// 3. Genre is never empty ("Unknown" when not supplied)
/// 4. Overview is either absent or non-blank
/// 5. Identity is generated by the store and never changes

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::{Certification, MovieStatus};

    fn sample() -> NewMovie {
        NewMovie {
            title: "Central Station".to_string(),
            duration: 113,
            overview: None,
            status: MovieStatus::Unavailable,
            genre: "Drama".to_string(),
            certification: Certification::Everyone,
        }
    }

    #[test]
    fn test_valid_movie() {
        assert!(validate_new_movie(&sample()).is_ok());
    }

    #[test]
    fn test_short_title_fails() {
        let movie = NewMovie {
            title: " A ".to_string(),
            ..sample()
        };
        assert!(validate_new_movie(&movie).is_err());
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        assert!(validate_title("Ãé").is_ok());
        assert!(validate_title(&"é".repeat(255)).is_ok());
        assert!(validate_title(&"é".repeat(256)).is_err());
    }

    #[test]
    fn test_duration_bounds() {
        assert_eq!(validate_duration(Some(1)).unwrap(), 1);
        assert_eq!(validate_duration(Some(600)).unwrap(), 600);
        assert!(validate_duration(Some(0)).is_err());
        assert!(validate_duration(Some(601)).is_err());
        assert!(validate_duration(Some(-5)).is_err());
        assert!(validate_duration(None).is_err());
    }

    #[test]
    fn test_patch_only_checks_supplied_fields() {
        assert!(validate_movie_patch(&MoviePatch::default()).is_ok());

        let blank_genre = MoviePatch {
            genre: Some("  ".to_string()),
            ..MoviePatch::default()
        };
        assert_eq!(
            validate_movie_patch(&blank_genre).unwrap_err().to_string(),
            "Genre cannot be empty"
        );
    }
}
