//! In-memory hotel store: an immutable catalog plus an append-only booking ledger.
//!
//! The catalog never changes after construction, so searches need no locking.
//! Bookings and the id counter live together behind one mutex so concurrent
//! requests can never observe a reused or out-of-order booking id.

mod catalog;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

pub use catalog::default_hotels;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Failures raised by [`HotelStore::book`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Hotel with ID {hotel_id} not found")]
    NotFound { hotel_id: String },

    #[error("Hotel {hotel_name} is not available on {date}")]
    DateUnavailable { hotel_name: String, date: String },

    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,
}

/// A bookable hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub price_per_night: f64,
    /// ISO dates (`YYYY-MM-DD`) on which a stay may start.
    pub available_dates: BTreeSet<String>,
}

impl Hotel {
    pub fn new(id: &str, name: &str, city: &str, price_per_night: f64, dates: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            price_per_night,
            available_dates: dates.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn is_available_on(&self, date: &str) -> bool {
        self.available_dates.contains(date)
    }
}

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelMatch {
    pub hotel_id: String,
    pub name: String,
    pub price_per_night: f64,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
}

/// A booking record as kept in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub hotel_id: String,
    pub user_id: String,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
}

/// What a successful booking reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub hotel_id: String,
    pub hotel_name: String,
    pub user_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub total_price: f64,
    pub status: BookingStatus,
}

#[derive(Default)]
struct BookingLedger {
    last_id: u64,
    bookings: Vec<Booking>,
}

/// Hotel catalog and booking ledger shared by every conversation.
pub struct HotelStore {
    hotels: Vec<Hotel>,
    ledger: Mutex<BookingLedger>,
}

impl HotelStore {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self {
            hotels,
            ledger: Mutex::new(BookingLedger::default()),
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    /// Find hotels in `city` (case-insensitive) costing at most `max_price` per
    /// night, optionally restricted to those available on `check_in_date`.
    ///
    /// An empty `check_in_date` is treated the same as `None`.
    pub fn search(
        &self,
        city: &str,
        max_price: f64,
        check_in_date: Option<&str>,
    ) -> Vec<HotelMatch> {
        let city = city.to_lowercase();
        let check_in_date = check_in_date.filter(|d| !d.is_empty());

        self.hotels
            .iter()
            .filter(|hotel| hotel.city.to_lowercase() == city)
            .filter(|hotel| hotel.price_per_night <= max_price)
            .filter(|hotel| check_in_date.map_or(true, |date| hotel.is_available_on(date)))
            .map(|hotel| HotelMatch {
                hotel_id: hotel.id.clone(),
                name: hotel.name.clone(),
                price_per_night: hotel.price_per_night,
                available: true,
            })
            .collect()
    }

    /// Reserve `hotel_id` for `user_id` between the two dates.
    ///
    /// Nothing is recorded unless every check passes.
    pub async fn book(
        &self,
        hotel_id: &str,
        user_id: &str,
        check_in_date: &str,
        check_out_date: &str,
    ) -> Result<BookingConfirmation, DomainError> {
        let hotel = self
            .hotels
            .iter()
            .find(|h| h.id == hotel_id)
            .ok_or_else(|| DomainError::NotFound {
                hotel_id: hotel_id.to_string(),
            })?;

        if !hotel.is_available_on(check_in_date) {
            return Err(DomainError::DateUnavailable {
                hotel_name: hotel.name.clone(),
                date: check_in_date.to_string(),
            });
        }

        let nights = count_nights(check_in_date, check_out_date)?;
        if nights <= 0 {
            return Err(DomainError::InvalidDateRange);
        }
        let total_price = hotel.price_per_night * nights as f64;

        let mut ledger = self.ledger.lock().await;
        ledger.last_id += 1;
        let booking = Booking {
            id: format!("booking-{}", ledger.last_id),
            hotel_id: hotel.id.clone(),
            user_id: user_id.to_string(),
            check_in: check_in_date.to_string(),
            check_out: check_out_date.to_string(),
            status: BookingStatus::Confirmed,
        };
        ledger.bookings.push(booking.clone());
        drop(ledger);

        tracing::info!(
            booking_id = %booking.id,
            hotel_id = %booking.hotel_id,
            nights,
            total_price,
            "Booking confirmed"
        );

        Ok(BookingConfirmation {
            booking_id: booking.id,
            hotel_id: booking.hotel_id,
            hotel_name: hotel.name.clone(),
            user_id: booking.user_id,
            check_in_date: booking.check_in,
            check_out_date: booking.check_out,
            total_price,
            status: booking.status,
        })
    }

    /// Snapshot of all bookings in creation order.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.ledger.lock().await.bookings.clone()
    }

    pub async fn booking_count(&self) -> usize {
        self.ledger.lock().await.bookings.len()
    }
}

impl Default for HotelStore {
    fn default() -> Self {
        Self::new(default_hotels())
    }
}

/// Whole nights between two ISO dates. Calendar dates carry no time of day,
/// so the day difference is already the ceiling.
fn count_nights(check_in: &str, check_out: &str) -> Result<i64, DomainError> {
    let check_in = parse_date("checkInDate", check_in)?;
    let check_out = parse_date("checkOutDate", check_out)?;
    Ok((check_out - check_in).num_days())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DomainError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn names(matches: &[HotelMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn search_vancouver_under_150() {
        let store = HotelStore::default();
        let results = store.search("Vancouver", 150.0, None);
        let names = names(&results);
        assert!(names.contains(&"Downtown Palace"));
        assert!(names.contains(&"Budget Inn"));
        assert!(!names.contains(&"Luxury Suites"));
        assert!(results.iter().all(|m| m.available));
    }

    #[test]
    fn search_city_is_case_insensitive_and_exact() {
        let store = HotelStore::default();
        assert_eq!(store.search("vAnCoUvEr", 1000.0, None).len(), 3);
        assert!(store.search("Vancouv", 1000.0, None).is_empty());
    }

    #[test]
    fn search_with_no_match_is_empty() {
        let store = HotelStore::default();
        assert!(store.search("Paris", 1000.0, None).is_empty());
        assert!(store.search("Toronto", 50.0, None).is_empty());
        assert!(HotelStore::new(Vec::new()).search("Toronto", 500.0, None).is_empty());
    }

    #[test]
    fn search_respects_city_and_price_for_every_threshold() {
        let store = HotelStore::default();
        for city in ["Vancouver", "toronto", "MONTREAL", "Calgary"] {
            for max_price in [0.0, 59.99, 60.0, 95.0, 100.0, 120.0, 249.0, 250.0, 1000.0] {
                for m in store.search(city, max_price, None) {
                    let hotel = store
                        .hotels()
                        .iter()
                        .find(|h| h.id == m.hotel_id)
                        .expect("result refers to a catalog hotel");
                    assert!(hotel.city.eq_ignore_ascii_case(city));
                    assert!(hotel.price_per_night <= max_price);
                }
            }
        }
    }

    #[test]
    fn date_filter_only_narrows_results() {
        let store = HotelStore::default();
        for date in ["2026-02-01", "2026-02-03", "2026-02-04", "2027-01-01"] {
            let unfiltered = store.search("Vancouver", 300.0, None);
            let filtered = store.search("Vancouver", 300.0, Some(date));
            assert!(filtered.iter().all(|m| unfiltered.contains(m)));
        }
        let on_fourth = store.search("Vancouver", 300.0, Some("2026-02-04"));
        assert_eq!(names(&on_fourth), vec!["Luxury Suites"]);
    }

    #[test]
    fn empty_date_means_no_date_filter() {
        let store = HotelStore::default();
        assert_eq!(
            store.search("Vancouver", 300.0, Some("")),
            store.search("Vancouver", 300.0, None)
        );
    }

    #[tokio::test]
    async fn book_two_nights_at_downtown_palace() {
        let store = HotelStore::default();
        let confirmation = store
            .book("hotel-1", "u1", "2026-02-01", "2026-02-03")
            .await
            .expect("booking succeeds");

        assert_eq!(confirmation.total_price, 240.0);
        assert_eq!(confirmation.status, BookingStatus::Confirmed);
        assert_eq!(confirmation.hotel_name, "Downtown Palace");
        assert_eq!(confirmation.booking_id, "booking-1");

        let bookings = store.bookings().await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].check_in, "2026-02-01");
        assert_eq!(bookings[0].check_out, "2026-02-03");
    }

    #[tokio::test]
    async fn total_price_is_price_times_nights() {
        let store = HotelStore::default();
        for hotel in store.hotels().to_vec() {
            for check_in in &hotel.available_dates {
                for nights in 1..=4i64 {
                    let start = NaiveDate::parse_from_str(check_in, DATE_FORMAT).expect("date");
                    let end = (start + chrono::Duration::days(nights))
                        .format(DATE_FORMAT)
                        .to_string();
                    let confirmation = store
                        .book(&hotel.id, "u1", check_in, &end)
                        .await
                        .expect("booking succeeds");
                    assert_eq!(
                        confirmation.total_price,
                        hotel.price_per_night * nights as f64
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn check_out_before_check_in_is_invalid_range() {
        let store = HotelStore::default();
        let err = store
            .book("hotel-1", "u1", "2026-02-01", "2026-01-31")
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidDateRange);
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn same_day_check_out_is_invalid_range() {
        let store = HotelStore::default();
        let err = store
            .book("hotel-2", "u1", "2026-02-02", "2026-02-02")
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidDateRange);
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn unavailable_check_in_is_rejected() {
        let store = HotelStore::default();
        for date in ["2026-02-03", "2026-03-01", "not-a-date"] {
            let err = store
                .book("hotel-2", "u1", date, "2026-02-10")
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::DateUnavailable { .. }));
        }
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_hotel_is_not_found() {
        let store = HotelStore::default();
        let err = store
            .book("hotel-99", "u1", "2026-02-01", "2026-02-02")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Hotel with ID hotel-99 not found");
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_check_out_is_invalid_date() {
        let store = HotelStore::default();
        let err = store
            .book("hotel-1", "u1", "2026-02-01", "next tuesday")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidDate {
                field: "checkOutDate",
                ..
            }
        ));
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn booking_ids_strictly_increase() {
        let store = HotelStore::default();
        let mut previous = 0u64;
        for _ in 0..5 {
            let confirmation = store
                .book("hotel-3", "u1", "2026-02-02", "2026-02-04")
                .await
                .expect("booking succeeds");
            let n: u64 = confirmation
                .booking_id
                .trim_start_matches("booking-")
                .parse()
                .expect("numeric suffix");
            assert!(n > previous);
            previous = n;
        }
        // A failed booking must not consume an id.
        let _ = store.book("hotel-3", "u1", "2026-02-02", "2026-02-01").await;
        let next = store
            .book("hotel-3", "u1", "2026-02-02", "2026-02-04")
            .await
            .expect("booking succeeds");
        assert_eq!(next.booking_id, "booking-6");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_get_distinct_ids() {
        let store = Arc::new(HotelStore::default());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .book("hotel-1", &format!("user-{i}"), "2026-02-01", "2026-02-02")
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task joins").expect("booking succeeds");
        }

        let bookings = store.bookings().await;
        let ids: Vec<u64> = bookings
            .iter()
            .map(|b| b.id.trim_start_matches("booking-").parse().expect("numeric"))
            .collect();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }
}
