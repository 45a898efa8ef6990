use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::{info, warn};

use crate::domain::event::entity::event;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{BookingResponse, CreateBookingRequest};
use super::entity::event_booking;

pub struct BookingService;

impl BookingService {
    /// Create a booking: persist the record, bump the event counter and
    /// dispatch the confirmation mail.
    ///
    /// The counter update is a single `SET n = n + quantity` so concurrent
    /// bookings of the same event never lose an increment. Mail dispatch is
    /// best-effort: the persisted booking is the source of truth and a relay
    /// failure is logged, not surfaced.
    pub async fn create_booking(
        state: AppState,
        req: CreateBookingRequest,
    ) -> Result<BookingResponse, AppError> {
        // 1. The event reference must resolve; a dangling id is a field
        //    error on `event`, not a 404
        let event_model = event::Entity::find_by_id(req.event)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::ValidationError(format!("event: event {} does not exist", req.event))
            })?;

        // 2. Persist the booking and the counter increment atomically
        let txn = state.db.begin().await?;

        let booking = event_booking::ActiveModel {
            event_id: Set(req.event),
            name: Set(req.name),
            email: Set(req.email),
            quantity: Set(req.quantity),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = booking.insert(&txn).await?;

        counter_increment(req.event, req.quantity).exec(&txn).await?;

        txn.commit().await?;

        // 3. Price at booking time; later price changes do not affect this
        let total_price = total_price(inserted.quantity, event_model.price);

        info!(
            booking_id = inserted.booking_id,
            event_id = inserted.event_id,
            quantity = inserted.quantity,
            total_price = %total_price,
            "Booking created"
        );

        // 4. Confirmation mail, never fatal
        let subject = "🎟️ Ticket Confirmation - Your Event Booking";
        let body = format!(
            "Thank you {} for booking {} ticket(s) to our event!\n\n\
             Event ID: {}\n\
             Quantity: {}\n\
             Total: ${}\n\n\
             We look forward to seeing you there!",
            inserted.name, inserted.quantity, inserted.event_id, inserted.quantity, total_price
        );

        if let Err(e) = state.mailer.send(&inserted.email, subject, &body).await {
            warn!(
                booking_id = inserted.booking_id,
                error = %e.message(),
                "Booking confirmation mail failed; booking is kept"
            );
        }

        Ok(inserted.into())
    }
}

/// quantity × unit price, in the event's currency.
pub fn total_price(quantity: i32, price: Decimal) -> Decimal {
    Decimal::from(quantity) * price
}

/// Counter bump as one in-place `n = n + quantity` statement. Concurrent
/// bookings of the same event must not lose increments, so this is never a
/// read followed by a write.
fn counter_increment(event_id: i64, quantity: i32) -> sea_orm::UpdateMany<event::Entity> {
    event::Entity::update_many()
        .col_expr(
            event::Column::NumberOfBookings,
            Expr::col(event::Column::NumberOfBookings).add(quantity),
        )
        .filter(event::Column::EventId.eq(event_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn total_price_multiplies_quantity_by_unit_price() {
        let price = Decimal::from_str("10.00").unwrap();
        assert_eq!(total_price(3, price), Decimal::from_str("30.00").unwrap());
    }

    #[test]
    fn total_price_keeps_cents() {
        let price = Decimal::from_str("19.99").unwrap();
        assert_eq!(total_price(2, price), Decimal::from_str("39.98").unwrap());
    }

    #[test]
    fn counter_bump_is_one_in_place_update() {
        use sea_orm::{DbBackend, QueryTrait};

        let sql = counter_increment(7, 3).build(DbBackend::MySql).to_string();
        assert!(
            sql.contains("`number_of_bookings` = `number_of_bookings` + 3"),
            "unexpected statement: {}",
            sql
        );
        assert!(sql.contains("`event_id` = 7"), "unexpected statement: {}", sql);
    }
}
