//! Built-in hotel catalog loaded at process start.

use super::Hotel;

/// The fixed set of hotels the agent can search and book.
pub fn default_hotels() -> Vec<Hotel> {
    vec![
        Hotel::new(
            "hotel-1",
            "Downtown Palace",
            "Vancouver",
            120.0,
            &["2026-02-01", "2026-02-02", "2026-02-03"],
        ),
        Hotel::new(
            "hotel-2",
            "Budget Inn",
            "Vancouver",
            60.0,
            &["2026-02-01", "2026-02-02"],
        ),
        Hotel::new(
            "hotel-3",
            "Luxury Suites",
            "Vancouver",
            250.0,
            &["2026-02-01", "2026-02-02", "2026-02-03", "2026-02-04"],
        ),
        Hotel::new(
            "hotel-4",
            "Toronto Gateway",
            "Toronto",
            100.0,
            &["2026-02-01", "2026-02-02"],
        ),
        Hotel::new(
            "hotel-5",
            "Montreal Elegance",
            "Montreal",
            95.0,
            &["2026-02-05", "2026-02-06", "2026-02-07"],
        ),
    ]
}
