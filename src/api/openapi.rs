//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, bookings, consumptions, courts, health, notifications, products, public, reports,
    schedule,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PadelClub API",
        version = "1.0.0",
        description = "Padel court booking and club management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::update_profile,
        // Bookings
        bookings::list_bookings,
        bookings::calendar,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::cancel_booking,
        bookings::close_booking,
        bookings::get_closure,
        // Courts
        courts::list_courts,
        courts::get_court,
        courts::create_court,
        courts::update_court,
        courts::toggle_court_active,
        courts::list_config_courts,
        courts::update_court_price,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Consumptions
        consumptions::list_consumptions,
        consumptions::create_consumption,
        consumptions::delete_consumption,
        // Notifications
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        // Reports
        reports::daily_summary,
        reports::history,
        // Config
        schedule::get_schedule,
        schedule::update_schedule,
        // Public
        public::courts,
        public::configuration,
        public::available_slots,
        public::create_booking,
        public::search_bookings,
        public::verify_token,
        public::cancel_by_token,
        public::cancel_by_id,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::UserInfo,
            crate::models::user::UpdateProfile,
            // Bookings
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingListItem,
            crate::models::booking::CalendarEntry,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            crate::models::closure::BookingClosure,
            crate::models::closure::ClosureDetails,
            crate::models::closure::CloseBooking,
            // Courts
            crate::models::court::Court,
            crate::models::court::CourtShort,
            crate::models::court::CreateCourt,
            crate::models::court::UpdateCourt,
            crate::models::court::UpdateCourtPrice,
            // Products
            crate::models::product::Product,
            crate::models::product::ProductDetails,
            crate::models::product::CreateProduct,
            crate::models::product::Consumption,
            crate::models::product::ConsumptionDetails,
            crate::models::product::CreateConsumption,
            // Notifications
            crate::models::notification::Notification,
            notifications::UnreadCountResponse,
            notifications::MarkAllReadResponse,
            // Reports
            crate::models::report::DailySummary,
            crate::models::report::PaymentMethodTotal,
            crate::models::report::ClosedBookingDetail,
            crate::models::report::HistoryItem,
            crate::models::report::HistoryClosure,
            // Config
            crate::models::schedule::TimeSlotConfig,
            crate::models::schedule::UpdateTimeSlotConfig,
            crate::models::schedule::ScheduleEcho,
            crate::models::schedule::AvailableSlot,
            // Public
            public::SlotsResponse,
            public::SearchResult,
            public::SearchResponse,
            public::PublicBookingRequest,
            public::PublicBookingResponse,
            public::VerifyTokenResponse,
            public::CancelRequest,
            public::CancelByIdRequest,
            public::CancelResponse,
            // Enums
            crate::models::enums::BookingStatus,
            crate::models::enums::BookingOrigin,
            crate::models::enums::CourtType,
            crate::models::enums::ProductCategory,
            crate::models::enums::NotificationType,
            crate::models::enums::UserRole,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "bookings", description = "Booking management"),
        (name = "courts", description = "Court management"),
        (name = "products", description = "Bar product management"),
        (name = "consumptions", description = "Consumptions charged to bookings"),
        (name = "notifications", description = "Staff notifications"),
        (name = "reports", description = "Billing reports"),
        (name = "config", description = "Scheduling configuration"),
        (name = "public", description = "Public booking flow")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
