use async_trait::async_trait;
use chrono::NaiveDateTime;
use pagination::PageRequest;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use domain_items::{BookingBrief, ItemResult};

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingState, BookingStatus, NewBooking};

/// Repository trait for booking persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new WAITING booking.
    async fn create(&self, input: NewBooking) -> BookingResult<Booking>;

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>>;

    async fn set_status(&self, id: i64, status: BookingStatus) -> BookingResult<Booking>;

    /// One page of a booker's bookings matching `state`, start descending.
    async fn by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>>;

    /// One page of the bookings of items owned by `owner_id`, start
    /// descending.
    async fn by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>>;
}

fn state_matches(booking: &Booking, state: BookingState, now: NaiveDateTime) -> bool {
    match state {
        BookingState::All => true,
        BookingState::Current => booking.start <= now && booking.end >= now,
        BookingState::Past => booking.end < now,
        BookingState::Future => booking.start > now,
        BookingState::Waiting => booking.status == BookingStatus::Waiting,
        BookingState::Rejected => booking.status == BookingStatus::Rejected,
    }
}

/// In-memory implementation used by tests and local development. Keeps the
/// item owner captured at create time since it has no items table to join.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    bookings: HashMap<i64, Booking>,
    owners: HashMap<i64, i64>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(
        &self,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
        keep: F,
    ) -> Vec<Booking>
    where
        F: Fn(&Store, &Booking) -> bool,
    {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .bookings
            .values()
            .filter(|b| keep(&store, b) && state_matches(b, state, now))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.start.cmp(&a.start));
        bookings
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, input: NewBooking) -> BookingResult<Booking> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let booking = Booking {
            id: store.next_id,
            item_id: input.item_id,
            booker_id: input.booker_id,
            start: input.start,
            end: input.end,
            status: BookingStatus::Waiting,
        };
        store.bookings.insert(booking.id, booking.clone());
        store.owners.insert(booking.id, input.item_owner_id);

        tracing::info!(booking_id = booking.id, item_id = booking.item_id, "created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let store = self.store.read().await;
        Ok(store.bookings.get(&id).cloned())
    }

    async fn set_status(&self, id: i64, status: BookingStatus) -> BookingResult<Booking> {
        let mut store = self.store.write().await;
        let booking = store
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::NotFound(id))?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        Ok(self
            .filtered(state, now, page, |_, b| b.booker_id == booker_id)
            .await)
    }

    async fn by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        Ok(self
            .filtered(state, now, page, |store, b| {
                store.owners.get(&b.id) == Some(&owner_id)
            })
            .await)
    }
}

#[async_trait]
impl domain_items::BookingHistory for InMemoryBookingRepository {
    async fn last_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let store = self.store.read().await;
        Ok(store
            .bookings
            .values()
            .filter(|b| {
                b.item_id == item_id && b.status == BookingStatus::Approved && b.start < now
            })
            .max_by_key(|b| b.start)
            .map(|b| BookingBrief {
                id: b.id,
                booker_id: b.booker_id,
            }))
    }

    async fn next_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let store = self.store.read().await;
        Ok(store
            .bookings
            .values()
            .filter(|b| {
                b.item_id == item_id && b.status == BookingStatus::Approved && b.start > now
            })
            .min_by_key(|b| b.start)
            .map(|b| BookingBrief {
                id: b.id,
                booker_id: b.booker_id,
            }))
    }

    async fn finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let store = self.store.read().await;
        Ok(store
            .bookings
            .values()
            .find(|b| {
                b.item_id == item_id
                    && b.booker_id == booker_id
                    && b.status == BookingStatus::Approved
                    && b.end < now
            })
            .map(|b| BookingBrief {
                id: b.id,
                booker_id: b.booker_id,
            }))
    }
}
