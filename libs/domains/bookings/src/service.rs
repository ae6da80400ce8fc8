use chrono::Utc;
use std::sync::Arc;

use domain_items::{Item, ItemLookup};
use domain_users::UserLookup;

use crate::error::{BookingError, BookingResult};
use crate::models::{
    Booking, BookingResponse, BookingState, BookingStatus, CreateBooking, NewBooking,
};
use crate::repository::BookingRepository;

/// Business rules for bookings.
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserLookup>,
    items: Arc<dyn ItemLookup>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R, users: Arc<dyn UserLookup>, items: Arc<dyn ItemLookup>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    async fn require_user(&self, id: i64) -> BookingResult<()> {
        self.users
            .user_by_id(id)
            .await?
            .ok_or(BookingError::UserNotFound(id))?;
        Ok(())
    }

    async fn require_item(&self, id: i64) -> BookingResult<Item> {
        self.items
            .item_by_id(id)
            .await?
            .ok_or(BookingError::ItemNotFound(id))
    }

    async fn require_booking(&self, id: i64) -> BookingResult<Booking> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    async fn to_response(&self, booking: Booking) -> BookingResult<BookingResponse> {
        let item = self.require_item(booking.item_id).await?;
        Ok(BookingResponse::from_parts(booking, item.name))
    }

    pub async fn create_booking(
        &self,
        booker_id: i64,
        input: CreateBooking,
    ) -> BookingResult<BookingResponse> {
        self.require_user(booker_id).await?;
        let item = self.require_item(input.item_id).await?;

        if !item.available {
            return Err(BookingError::Validation(
                "the item is not available for booking".to_string(),
            ));
        }
        if input.start >= input.end {
            return Err(BookingError::Validation(
                "the booking end date must be after the start date".to_string(),
            ));
        }
        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem);
        }

        let booking = self
            .repository
            .create(NewBooking {
                item_id: item.id,
                item_owner_id: item.owner_id,
                booker_id,
                start: input.start,
                end: input.end,
            })
            .await?;

        self.to_response(booking).await
    }

    /// Decide a WAITING booking. The owner approves or rejects; the booker
    /// may only cancel, by passing `approved=false`.
    pub async fn decide_booking(
        &self,
        booking_id: i64,
        caller_id: i64,
        approved: bool,
    ) -> BookingResult<BookingResponse> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        let status = if caller_id == booking.booker_id {
            if approved {
                return Err(BookingError::ApproveByBooker);
            }
            BookingStatus::Canceled
        } else if caller_id == item.owner_id {
            match booking.status {
                BookingStatus::Canceled => return Err(BookingError::AlreadyCanceled),
                BookingStatus::Waiting => {
                    if approved {
                        BookingStatus::Approved
                    } else {
                        BookingStatus::Rejected
                    }
                }
                _ => return Err(BookingError::AlreadyDecided),
            }
        } else {
            return Err(BookingError::NotParticipant);
        };

        let booking = self.repository.set_status(booking.id, status).await?;
        self.to_response(booking).await
    }

    /// Read a booking. Only the booker and the item owner may see it.
    pub async fn get_booking(
        &self,
        booking_id: i64,
        caller_id: i64,
    ) -> BookingResult<BookingResponse> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if caller_id != booking.booker_id && caller_id != item.owner_id {
            return Err(BookingError::NotParticipant);
        }

        Ok(BookingResponse::from_parts(booking, item.name))
    }

    pub async fn bookings_by_booker(
        &self,
        booker_id: i64,
        state: &str,
        from: i64,
        size: Option<i64>,
    ) -> BookingResult<Vec<BookingResponse>> {
        self.require_user(booker_id).await?;
        let state = parse_state(state)?;
        let now = Utc::now().naive_utc();

        let bookings = pagination::fetch_all(from, size, |page| {
            let repository = Arc::clone(&self.repository);
            async move { repository.by_booker(booker_id, state, now, page).await }
        })
        .await?;

        self.to_responses(bookings).await
    }

    pub async fn bookings_by_owner(
        &self,
        owner_id: i64,
        state: &str,
        from: i64,
        size: Option<i64>,
    ) -> BookingResult<Vec<BookingResponse>> {
        self.require_user(owner_id).await?;
        let state = parse_state(state)?;
        let now = Utc::now().naive_utc();

        let bookings = pagination::fetch_all(from, size, |page| {
            let repository = Arc::clone(&self.repository);
            async move { repository.by_owner(owner_id, state, now, page).await }
        })
        .await?;

        self.to_responses(bookings).await
    }

    async fn to_responses(&self, bookings: Vec<Booking>) -> BookingResult<Vec<BookingResponse>> {
        let mut responses = Vec::with_capacity(bookings.len());
        for booking in bookings {
            responses.push(self.to_response(booking).await?);
        }
        Ok(responses)
    }
}

fn parse_state(state: &str) -> BookingResult<BookingState> {
    state
        .parse()
        .map_err(|_| BookingError::UnknownState(state.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryBookingRepository;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDateTime};
    use domain_items::{ItemResult, ItemError};
    use domain_users::{User, UserResult};

    struct AnyUser;

    #[async_trait]
    impl UserLookup for AnyUser {
        async fn user_by_id(&self, id: i64) -> UserResult<Option<User>> {
            Ok(Some(User {
                id,
                name: format!("user-{id}"),
                email: format!("user{id}@example.com"),
            }))
        }
    }

    /// Item 1 belongs to user 1 and is available; item 2 is unavailable.
    struct TwoItems;

    #[async_trait]
    impl ItemLookup for TwoItems {
        async fn item_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
            match id {
                1 => Ok(Some(Item {
                    id: 1,
                    name: "Drill".to_string(),
                    description: "Cordless".to_string(),
                    available: true,
                    owner_id: 1,
                    request_id: None,
                })),
                2 => Ok(Some(Item {
                    id: 2,
                    name: "Saw".to_string(),
                    description: "Dull".to_string(),
                    available: false,
                    owner_id: 1,
                    request_id: None,
                })),
                _ => Ok(None),
            }
        }

        async fn items_by_request(&self, _request_id: i64) -> ItemResult<Vec<Item>> {
            Err(ItemError::Internal("not used".to_string()))
        }
    }

    fn service() -> BookingService<InMemoryBookingRepository> {
        BookingService::new(
            InMemoryBookingRepository::new(),
            Arc::new(AnyUser),
            Arc::new(TwoItems),
        )
    }

    fn tomorrow() -> NaiveDateTime {
        Utc::now().naive_utc() + Duration::days(1)
    }

    fn valid_booking() -> CreateBooking {
        CreateBooking {
            item_id: 1,
            start: tomorrow(),
            end: tomorrow() + Duration::days(1),
        }
    }

    #[tokio::test]
    async fn create_sets_waiting_status() {
        let booking = service().create_booking(2, valid_booking()).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.item.name, "Drill");
        assert_eq!(booking.booker.id, 2);
    }

    #[tokio::test]
    async fn create_rejects_unavailable_item() {
        let err = service()
            .create_booking(
                2,
                CreateBooking {
                    item_id: 2,
                    start: tomorrow(),
                    end: tomorrow() + Duration::days(1),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_inverted_dates() {
        let err = service()
            .create_booking(
                2,
                CreateBooking {
                    item_id: 1,
                    start: tomorrow() + Duration::days(1),
                    end: tomorrow(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn owner_cannot_book_own_item() {
        let err = service().create_booking(1, valid_booking()).await.unwrap_err();
        assert_eq!(err.to_string(), "owner cannot book own item");
    }

    #[tokio::test]
    async fn booker_cannot_approve() {
        let service = service();
        let booking = service.create_booking(2, valid_booking()).await.unwrap();

        let err = service
            .decide_booking(booking.id, 2, true)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::ApproveByBooker));
    }

    #[tokio::test]
    async fn booker_can_cancel() {
        let service = service();
        let booking = service.create_booking(2, valid_booking()).await.unwrap();

        let canceled = service.decide_booking(booking.id, 2, false).await.unwrap();
        assert_eq!(canceled.status, BookingStatus::Canceled);
    }

    #[tokio::test]
    async fn owner_decision_is_final() {
        let service = service();
        let booking = service.create_booking(2, valid_booking()).await.unwrap();

        let approved = service.decide_booking(booking.id, 1, true).await.unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let err = service
            .decide_booking(booking.id, 1, false)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyDecided));
    }

    #[tokio::test]
    async fn owner_cannot_decide_canceled_booking() {
        let service = service();
        let booking = service.create_booking(2, valid_booking()).await.unwrap();
        service.decide_booking(booking.id, 2, false).await.unwrap();

        let err = service
            .decide_booking(booking.id, 1, true)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyCanceled));
    }

    #[tokio::test]
    async fn stranger_cannot_act_or_view() {
        let service = service();
        let booking = service.create_booking(2, valid_booking()).await.unwrap();

        let err = service
            .decide_booking(booking.id, 3, true)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotParticipant));

        let err = service.get_booking(booking.id, 3).await.unwrap_err();
        assert!(matches!(err, BookingError::NotParticipant));

        assert!(service.get_booking(booking.id, 1).await.is_ok());
        assert!(service.get_booking(booking.id, 2).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_state_is_rejected_with_message() {
        let err = service()
            .bookings_by_owner(1, "TEST", 0, Some(10))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: TEST");
    }

    #[tokio::test]
    async fn listings_filter_by_state_and_order_by_start_desc() {
        let service = service();
        let early = service
            .create_booking(
                2,
                CreateBooking {
                    item_id: 1,
                    start: tomorrow(),
                    end: tomorrow() + Duration::hours(2),
                },
            )
            .await
            .unwrap();
        let late = service
            .create_booking(
                2,
                CreateBooking {
                    item_id: 1,
                    start: tomorrow() + Duration::days(2),
                    end: tomorrow() + Duration::days(3),
                },
            )
            .await
            .unwrap();
        service.decide_booking(early.id, 1, false).await.unwrap();

        let all = service
            .bookings_by_booker(2, "ALL", 0, Some(10))
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![late.id, early.id]
        );

        let rejected = service
            .bookings_by_owner(1, "REJECTED", 0, Some(10))
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, early.id);

        let future = service
            .bookings_by_booker(2, "FUTURE", 0, Some(10))
            .await
            .unwrap();
        assert_eq!(future.len(), 2);
    }
}
