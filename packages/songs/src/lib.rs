include!(concat!(env!("OUT_DIR"), "/songs.rs"));

/// A song with its name and source text
#[derive(Debug, Clone)]
pub struct Song {
    pub name: String,
    pub content: String,
}

impl Song {
    fn from_entry((name, content): &(&str, &str)) -> Self {
        Song {
            name: name.to_string(),
            content: content.to_string(),
        }
    }
}

/// Get all embedded songs, sorted by name
pub fn get_all_songs() -> Vec<Song> {
    SONGS.iter().map(Song::from_entry).collect()
}

/// Get a song by name (file stem, e.g. `amazing-grace`)
pub fn get_song(name: &str) -> Option<Song> {
    SONGS.iter().find(|(n, _)| *n == name).map(Song::from_entry)
}

/// List all song names
pub fn list_songs() -> Vec<&'static str> {
    SONGS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_is_embedded() {
        assert!(!list_songs().is_empty());
        assert_eq!(get_all_songs().len(), list_songs().len());
    }

    #[test]
    fn test_get_song() {
        let song = get_song("amazing-grace").expect("amazing-grace should be embedded");
        assert!(song.content.contains("title: Amazing Grace"));
        assert!(get_song("no-such-song").is_none());
    }

    #[test]
    fn test_names_have_no_extension() {
        assert!(list_songs().iter().all(|name| !name.ends_with(".txt")));
    }
}
