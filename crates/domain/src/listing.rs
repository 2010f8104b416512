//! Listing: a rentable property with a nightly price.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HearthError, ValidationError};
use crate::id::{ListingId, UserId};
use crate::time::{Timestamp, now};

/// Highest nightly price a listing may ask.
pub const MAX_NIGHTLY_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The kind of property a listing advertises.
///
/// Only short-stay listings take nightly reservations; the others are shown
/// without a booking widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Airbnb,
    Rent,
    Sale,
    Land,
    Commercial,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Airbnb,
        Category::Rent,
        Category::Sale,
        Category::Land,
        Category::Commercial,
    ];

    /// Human-readable label, also the accepted textual form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Airbnb => "Airbnb",
            Self::Rent => "Rent",
            Self::Sale => "Sale",
            Self::Land => "Land",
            Self::Commercial => "Commercial",
        }
    }

    /// Whether guests can book nights on listings of this category.
    #[must_use]
    pub fn supports_reservation(self) -> bool {
        matches!(self, Self::Airbnb)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive match against [`Category::label`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// A property offered by a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub category: Category,
    pub address: String,
    /// Price of a single night.
    pub price: Decimal,
    pub created_at: Timestamp,
}

impl Listing {
    /// Create a builder for constructing a [`Listing`].
    #[must_use]
    pub fn builder() -> ListingBuilder {
        ListingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when:
    /// - `title` is empty ([`ValidationError::EmptyTitle`])
    /// - `price` is zero or negative ([`ValidationError::NonPositivePrice`])
    /// - `price` is above [`MAX_NIGHTLY_PRICE`] ([`ValidationError::PriceTooHigh`])
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if self.price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice.into());
        }
        if self.price > MAX_NIGHTLY_PRICE {
            return Err(ValidationError::PriceTooHigh {
                max: MAX_NIGHTLY_PRICE,
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn supports_reservation(&self) -> bool {
        self.category.supports_reservation()
    }
}

/// Step-by-step builder for [`Listing`].
#[derive(Debug, Default)]
pub struct ListingBuilder {
    id: Option<ListingId>,
    owner_id: Option<UserId>,
    title: Option<String>,
    description: Option<String>,
    image_src: Option<String>,
    category: Option<Category>,
    address: Option<String>,
    price: Option<Decimal>,
    created_at: Option<Timestamp>,
}

impl ListingBuilder {
    #[must_use]
    pub fn id(mut self, id: ListingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn owner_id(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image_src(mut self, image_src: impl Into<String>) -> Self {
        self.image_src = Some(image_src.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Listing`].
    ///
    /// Category defaults to [`Category::Airbnb`].
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if `title` is missing or `price`
    /// is missing or not positive.
    pub fn build(self) -> Result<Listing, HearthError> {
        let listing = Listing {
            id: self.id.unwrap_or_default(),
            owner_id: self.owner_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image_src: self.image_src.unwrap_or_default(),
            category: self.category.unwrap_or(Category::Airbnb),
            address: self.address.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(now),
        };
        listing.validate()?;
        Ok(listing)
    }
}
