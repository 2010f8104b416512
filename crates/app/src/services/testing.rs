//! In-memory port implementations shared by the service and booking tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use hearth_domain::error::HearthError;
use hearth_domain::event::Event;
use hearth_domain::id::{ListingId, ReservationId, UserId};
use hearth_domain::listing::{Category, Listing};
use hearth_domain::reservation::Reservation;
use hearth_domain::user::User;

use crate::ports::{EventPublisher, ListingRepository, ReservationRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryListingRepo {
    store: Mutex<HashMap<ListingId, Listing>>,
}

impl ListingRepository for InMemoryListingRepo {
    fn create(&self, listing: Listing) -> impl Future<Output = Result<Listing, HearthError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(listing.id, listing.clone());
        async { Ok(listing) }
    }

    fn get_by_id(
        &self,
        id: ListingId,
    ) -> impl Future<Output = Result<Option<Listing>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let mut result: Vec<Listing> = store.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        async { Ok(result) }
    }

    fn find_by_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<Listing>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let result: Vec<Listing> = store
            .values()
            .filter(|listing| listing.category == category)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn delete(&self, id: ListingId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryReservationRepo {
    store: Mutex<HashMap<ReservationId, Reservation>>,
}

impl ReservationRepository for InMemoryReservationRepo {
    fn create(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, HearthError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(reservation.id, reservation.clone());
        async { Ok(reservation) }
    }

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_listing(
        &self,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let mut result: Vec<Reservation> = store
            .values()
            .filter(|res| res.listing_id == listing_id)
            .cloned()
            .collect();
        result.sort_by_key(|res| res.start_date);
        // Suspends after the snapshot so concurrent callers interleave.
        async {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Reservation>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let mut result: Vec<Reservation> = store
            .values()
            .filter(|res| res.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|res| res.start_date);
        async { Ok(result) }
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    store: Mutex<HashMap<UserId, User>>,
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, HearthError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.insert(user.id, user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, HearthError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.get(&id).cloned();
        async { Ok(result) }
    }
}

/// Publisher that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<Event>>,
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HearthError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
