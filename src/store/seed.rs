// src/store/seed.rs
//
// Initial titles loaded into a fresh catalog
//
// PRINCIPLES:
// - Seeding runs exactly once, on a catalog with no persisted image
// - Insertion order is stable: the movie first, then the series
// - No persistence here; the store handle saves after seeding

use rusqlite::{params, Connection};

use crate::error::CatalogResult;

/// Episode playback locators for the seeded series, one per line.
const DORAEMON_EPISODE_URLS: &str = include_str!("../../data/doraemon_urls.txt");

const DORAEMON_EPISODE_COUNT: usize = 150;

const DHURANDHAR_CAST: [(&str, &str); 9] = [
    ("Sara Arjun", "Yalina Jamali"),
    ("Akshaye Khanna", "Rehman Dakait"),
    ("Ranveer Singh", "Hamza Ali Mazari, Jaskirat Singh"),
    ("Arjun Rampal", "Major Iqbal"),
    ("Sanjay Dutt", "SP Chaudhary Aslam"),
    ("R. Madhavan", "Ajay Sanyal"),
    ("Rakesh Bedi", "Jameel Jamali"),
    ("Manav Gohil", "Sushant Bansal"),
    ("Saumya Tandon", "Ulfat Hasin"),
];

const DHURANDHAR_CREW: [(&str, &str); 6] = [
    ("Aditya Dhar", "Director"),
    ("Aditya Dhar", "Writer"),
    ("Jyoti Deshpande", "Producer"),
    ("Lokesh Dhar", "Producer"),
    ("Shashwat Sachdev", "Music Director"),
    ("Shivkumar V. Panicker", "Editor"),
];

const DORAEMON_CAST: [(&str, &str); 5] = [
    ("Wasabi Mizuta", "Doraemon (voice)"),
    ("Megumi Ohara", "Nobita Nobi (voice)"),
    ("Yumi Kakazu", "Shizuka Minamoto (voice)"),
    ("Subaru Kimura", "Takeshi Goda (voice)"),
    ("Tomokazu Seki", "Suneo Honekawa (voice)"),
];

/// Load the initial titles into an empty catalog.
pub fn seed_catalog(conn: &Connection) -> CatalogResult<()> {
    seed_dhurandhar(conn)?;
    seed_doraemon(conn)?;
    Ok(())
}

fn seed_dhurandhar(conn: &Connection) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO content (title, year, genre, rating, poster_url, banner_url, kind, duration, overview, streaming_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            "Dhurandhar",
            2025,
            "Action/Adventure",
            "8.6",
            "/src/assets/dhurandhar-banner.webp",
            "/src/assets/dhurandhar-banner.webp",
            "movie",
            "3h 34m",
            "A mysterious traveler slips into the heart of Karachi's underbelly and rises through its ranks with lethal precision, only to tear the notorious network apart from within. Dhurandhar is a 2025 Indian Hindi-language spy action thriller film written, co-produced and directed by Aditya Dhar, starring Ranveer Singh, Akshaye Khanna, Sanjay Dutt, R. Madhavan, and Arjun Rampal.",
            "https://drive.google.com/file/d/1FPF1jblO-w-MFxiLjWJ26wsXZtubbRfh/preview",
        ],
    )?;
    let content_id = conn.last_insert_rowid();

    let mut insert_cast = conn.prepare(
        "INSERT INTO cast_members (content_id, name, role) VALUES (?1, ?2, ?3)",
    )?;
    for (name, role) in DHURANDHAR_CAST {
        insert_cast.execute(params![content_id, name, role])?;
    }

    let mut insert_crew = conn.prepare(
        "INSERT INTO crew_members (content_id, name, role) VALUES (?1, ?2, ?3)",
    )?;
    for (name, role) in DHURANDHAR_CREW {
        insert_crew.execute(params![content_id, name, role])?;
    }

    Ok(())
}

fn seed_doraemon(conn: &Connection) -> CatalogResult<()> {
    conn.execute(
        "INSERT INTO content (title, year, genre, rating, poster_url, banner_url, kind, duration, overview, streaming_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            "Doraemon",
            2005,
            "Animation/Comedy/Family",
            "8.5",
            "/src/assets/doraemon-poster.jfif",
            "/src/assets/doraemon-poster.jfif",
            "series",
            "24m per episode",
            "Doraemon is a robotic cat who travels back in time from the 22nd century to help a schoolboy named Nobita. The series follows their adventures as Doraemon uses his amazing gadgets from his fourth-dimensional pocket to help Nobita with his everyday problems, though things often go hilariously wrong.",
            "",
        ],
    )?;
    let content_id = conn.last_insert_rowid();

    let urls: Vec<&str> = DORAEMON_EPISODE_URLS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut insert_episode = conn.prepare(
        "INSERT INTO episodes (content_id, episode_number, title, url) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for number in 1..=DORAEMON_EPISODE_COUNT {
        let url = urls[(number - 1) % urls.len()];
        insert_episode.execute(params![
            content_id,
            number as i64,
            format!("Episode {}", number),
            url,
        ])?;
    }

    let mut insert_cast = conn.prepare(
        "INSERT INTO cast_members (content_id, name, role) VALUES (?1, ?2, ?3)",
    )?;
    for (name, role) in DORAEMON_CAST {
        insert_cast.execute(params![content_id, name, role])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::create_tables;

    fn seeded_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        seed_catalog(&conn).unwrap();
        conn
    }

    #[test]
    fn test_seed_inserts_two_titles() {
        let conn = seeded_connection();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_seed_movie_comes_first() {
        let conn = seeded_connection();

        let (title, kind): (String, String) = conn
            .query_row(
                "SELECT title, kind FROM content ORDER BY id LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(title, "Dhurandhar");
        assert_eq!(kind, "movie");
    }

    #[test]
    fn test_seed_series_has_150_episodes() {
        let conn = seeded_connection();

        let series_id: i64 = conn
            .query_row(
                "SELECT id FROM content WHERE kind = 'series'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        let episode_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM episodes WHERE content_id = ?1",
                [series_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(episode_count, 150);

        let (first_title, first_number): (String, i64) = conn
            .query_row(
                "SELECT title, episode_number FROM episodes WHERE content_id = ?1 ORDER BY episode_number LIMIT 1",
                [series_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(first_title, "Episode 1");
        assert_eq!(first_number, 1);
    }

    #[test]
    fn test_seed_episode_urls_are_playback_locators() {
        let conn = seeded_connection();

        let bad_urls: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM episodes WHERE url NOT LIKE 'https://drive.google.com/file/d/%/preview'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(bad_urls, 0);
    }

    #[test]
    fn test_seed_credit_counts() {
        let conn = seeded_connection();

        let cast_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM cast_members", [], |row| row.get(0))
            .unwrap();
        assert_eq!(cast_count, 9 + 5);

        let crew_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM crew_members", [], |row| row.get(0))
            .unwrap();
        assert_eq!(crew_count, 6);
    }
}
