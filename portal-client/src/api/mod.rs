//! Named REST operations grouped by resource. Every function is a direct pass-through to the
//! [HttpClient][crate::http::HttpClient]: no validation, no retries, no state.

pub mod auth;
pub mod bookings;
pub mod doctors;
pub mod durations;
pub mod payments;
pub mod products;
pub mod services;
pub mod transactions;
pub mod uploads;
pub mod users;
pub mod workshops;

/// `{prefix}/{id}` path of a single record
fn record_path(prefix: &str, id: i64) -> String {
    format!("{prefix}/{id}")
}

#[cfg(test)]
mod test {
    use portal_common::{
        booking::{BookingStatus, BookingStatusUpdate},
        catalog::ServiceCategory,
        role::Role,
    };
    use serde_json::json;

    use super::{bookings, payments, services, transactions, uploads, users, workshops};
    use crate::{
        http::{Error, Method, MockTransport, RequestBody},
        router::Page,
        testing::{harness, json_response, logged_in_storage, API_URL},
    };

    /// Mock expecting exactly one `method` request to `path` that answers with `body`
    fn expect_one(method: Method, path: &'static str, body: serde_json::Value) -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(move |request| request.method == method && request.url == format!("{API_URL}{path}"))
            .times(1)
            .returning(move |_| Ok(json_response(200, body.clone())));
        transport
    }

    #[tokio::test]
    async fn get_all_services_should_decode_catalog() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        let client = harness.client(expect_one(
            Method::GET,
            "/getlayanan",
            json!([
                { "id": 1, "name": "Servis Rutin", "category": "bengkel", "price": 150000.0 },
                { "id": 2, "name": "Konseling", "category": "psikologi" }
            ]),
        ));

        let response = services::get_all_services(&client).await?;

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].details.category, ServiceCategory::Psikologi);
        Ok(())
    }

    #[tokio::test]
    async fn get_services_by_category_should_send_tag_as_query() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.url == format!("{API_URL}/getlayanan")
                    && request.query == [("kategori".to_owned(), "opo-wae".to_owned())]
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!([]))));
        let client = harness.client(transport);

        let response = services::get_services_by_category(&client, ServiceCategory::OpoWae).await?;

        assert!(response.data.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_booking_status_should_put_status_body() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminDashboard);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::PUT
                    && request.url == format!("{API_URL}/updatebooking/12")
                    && request.body == RequestBody::Json(br#"{"status":"confirmed"}"#.to_vec())
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "msg": "Booking diperbarui" }))));
        let client = harness.client(transport);

        let update = BookingStatusUpdate {
            status: BookingStatus::Confirmed,
        };
        let response = bookings::update_booking_status(&client, 12, &update).await?;

        assert_eq!(response.data.text(), Some("Booking diperbarui"));
        Ok(())
    }

    #[tokio::test]
    async fn confirm_payment_should_hit_confirm_route() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminTransactions);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::PUT
                    && request.url == format!("{API_URL}/payment/5/confirm")
                    && request.body == RequestBody::Empty
                    && request.header("Content-Type").is_none()
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "msg": "Pembayaran dikonfirmasi" }))));
        let client = harness.client(transport);

        let response = payments::confirm_payment(&client, 5).await?;

        assert_eq!(response.data.text(), Some("Pembayaran dikonfirmasi"));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_transactions_should_decode_ledger() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminTransactions);
        let client = harness.client(expect_one(
            Method::GET,
            "/admin/transactions",
            json!([{ "id": 1, "booking_id": 3, "amount": 50000.0, "status": "pending" }]),
        ));

        let response = transactions::get_all_transactions(&client).await?;

        assert_eq!(response.data[0].booking_id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn delete_user_and_workshop_should_use_record_paths() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminDashboard);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::DELETE
                    && (request.url == format!("{API_URL}/users/4")
                        || request.url == format!("{API_URL}/bengkel/9"))
            })
            .times(2)
            .returning(|_| Ok(json_response(200, json!({ "msg": "Dihapus" }))));
        let client = harness.client(transport);

        users::delete_user(&client, 4).await?;
        workshops::delete_workshop(&client, 9).await?;
        Ok(())
    }

    #[tokio::test]
    async fn upload_image_should_send_image_field() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminServices);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| match &request.body {
                RequestBody::Multipart(upload) => {
                    upload.field == "image" && upload.file_name == "bengkel.jpg" && upload.mime == "image/jpeg"
                }
                _ => false,
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "url": "/uploads/bengkel.jpg" }))));
        let client = harness.client(transport);

        let response = uploads::upload_image(&client, "bengkel.jpg", "image/jpeg", vec![0xff, 0xd8]).await?;

        assert_eq!(response.data.url, "/uploads/bengkel.jpg");
        Ok(())
    }
}
