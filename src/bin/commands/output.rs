use lastfm_explorer::{SearchSession, View};

/// Number of tags shown on an artist page
const MAX_TAGS: usize = 5;

/// Trait for drawing a session snapshot
pub trait SessionRenderer {
    fn render(&mut self, session: &SearchSession);
}

/// Default renderer.
/// Status messages go to stderr, the artist/track/album data to stdout.
pub struct HumanReadableRenderer;

impl HumanReadableRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HumanReadableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRenderer for HumanReadableRenderer {
    fn render(&mut self, session: &SearchSession) {
        if let Some(error) = &session.error {
            eprintln!("❌ {error}");
        }

        match session.view() {
            View::Empty => {
                if session.error.is_none() {
                    eprintln!("No artists found for '{}'", session.query);
                }
            }
            View::Results => {
                eprintln!("Search results for '{}':", session.query);
                for (i, artist) in session.results.iter().enumerate() {
                    println!(
                        "{:>3}. {} ({} listeners)",
                        i + 1,
                        artist.name,
                        format_count(artist.listeners)
                    );
                }
            }
            View::Detail => render_detail(session),
        }
    }
}

fn render_detail(session: &SearchSession) {
    let Some(artist) = &session.selected else {
        return;
    };

    println!("🎤 {}", artist.name);
    println!(
        "   👥 {} listeners   ▶️  {} plays",
        format_count(artist.stats.listeners),
        format_count(artist.stats.playcount)
    );
    if artist.on_tour {
        println!("   🚌 On tour");
    }
    if !artist.tags.is_empty() {
        let tags: Vec<&str> = artist
            .tags
            .iter()
            .take(MAX_TAGS)
            .map(|t| t.name.as_str())
            .collect();
        println!("   🏷️  {}", tags.join(", "));
    }
    if let Some(image) = artist.display_image() {
        println!("   🖼️  {image}");
    }
    println!("   🔗 {}", artist.url);

    let bio = artist.bio.cleaned_summary();
    if !bio.is_empty() {
        println!();
        println!("{bio}");
    }

    if !artist.similar.is_empty() {
        let similar: Vec<&str> = artist.similar.iter().map(|s| s.name.as_str()).collect();
        println!();
        println!("Similar: {}", similar.join(", "));
    }

    if !session.tracks.is_empty() {
        println!();
        println!("🎵 Top Tracks");
        for (i, track) in session.tracks.iter().enumerate() {
            println!(
                "{:>3}. {} ({} plays)",
                track.rank.map(|r| r as usize).unwrap_or(i + 1),
                track.name,
                format_count(track.playcount)
            );
        }
    }

    if !session.albums.is_empty() {
        println!();
        println!("💿 Top Albums");
        for (i, album) in session.albums.iter().enumerate() {
            println!(
                "{:>3}. {} ({} plays)",
                album.rank.map(|r| r as usize).unwrap_or(i + 1),
                album.name,
                format_count(album.playcount)
            );
        }
    }
}

/// JSON renderer: the whole session as one line on stdout
pub struct JsonRenderer;

impl SessionRenderer for JsonRenderer {
    fn render(&mut self, session: &SearchSession) {
        match serde_json::to_string(session) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("❌ Failed to serialize session: {e}"),
        }
    }
}

/// Group digits with commas, e.g. 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
