mod common;

use axum::http::{Method, StatusCode};
use conference_booking::models::TicketStatus;
use serde_json::json;

use common::{eligible_user, room, user_with_ticket, TestApp};

#[tokio::test]
async fn health() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn get_booking_without_token() {
    let app = TestApp::new();

    let (status, _) = app.request(Method::GET, "/api/booking", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_booking_invalid_token() {
    let app = TestApp::new();

    let (status, _) = app
        .request(Method::GET, "/api/booking", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_booking_token_without_session() {
    let app = TestApp::new();
    let token = conference_booking::middleware::JwtClaims {
        user_id: 1,
        exp: None,
    }
    .encode(common::JWT_SECRET)
    .unwrap();

    let (status, _) = app
        .request(Method::GET, "/api/booking", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_booking_not_found() {
    let app = TestApp::new();
    let token = app.token_for(1).await;

    let (status, body) = app
        .request(Method::GET, "/api/booking", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn get_booking_with_room() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;
    let room = room(&app.store, 3).await;
    let (_, created) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    let (status, body) = app
        .request(Method::GET, "/api/booking", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["bookingId"]);
    assert_eq!(body["room"]["id"], json!(room.id));
    assert_eq!(body["room"]["capacity"], json!(3));
    assert_eq!(body["room"]["hotelId"], json!(room.hotel_id));
}

#[tokio::test]
async fn post_booking_invalid_body() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;

    let bodies = [
        None,
        Some(json!({})),
        Some(json!({ "roomId": "abc" })),
        Some(json!({ "roomId": 0 })),
    ];

    for body in bodies {
        let (status, _) = app
            .request(Method::POST, "/api/booking", Some(&token), body)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn post_booking_without_enrollment() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    let room = room(&app.store, 1).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_booking_without_ticket() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    app.store.insert_enrollment(1).await.unwrap();
    let room = room(&app.store, 1).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_booking_unpaid_ticket() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    user_with_ticket(&app.store, 1, TicketStatus::Reserved, false, true).await;
    let room = room(&app.store, 1).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn post_booking_unknown_room() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": 9999 })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_booking_full_room() {
    let app = TestApp::new();
    let room = room(&app.store, 1).await;
    eligible_user(&app.store, 1).await;
    eligible_user(&app.store, 2).await;
    let first = app.token_for(1).await;
    let second = app.token_for(2).await;
    let body = json!({ "roomId": room.id });

    let (first_status, _) = app
        .request(Method::POST, "/api/booking", Some(&first), Some(body.clone()))
        .await;
    let (second_status, _) = app
        .request(Method::POST, "/api/booking", Some(&second), Some(body))
        .await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn post_booking_success() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;
    let room = room(&app.store, 2).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["bookingId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn put_booking_without_booking() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    let room = room(&app.store, 2).await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/booking/1",
            Some(&token),
            Some(json!({ "roomId": room.id })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn put_booking_invalid_booking_id() {
    let app = TestApp::new();
    let token = app.token_for(1).await;

    for uri in ["/api/booking/abc", "/api/booking/0"] {
        let (status, _) = app
            .request(Method::PUT, uri, Some(&token), Some(json!({ "roomId": 1 })))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn put_booking_moves_user_to_new_room() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;
    let old_room = room(&app.store, 1).await;
    let new_room = room(&app.store, 1).await;
    let (_, created) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&token),
            Some(json!({ "roomId": old_room.id })),
        )
        .await;
    let booking_id = created["bookingId"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/booking/{booking_id}"),
            Some(&token),
            Some(json!({ "roomId": new_room.id })),
        )
        .await;
    let (_, booking) = app
        .request(Method::GET, "/api/booking", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingId"], json!(booking_id));
    assert_eq!(booking["room"]["id"], json!(new_room.id));
}

#[tokio::test]
async fn put_booking_of_another_user() {
    let app = TestApp::new();
    let target = room(&app.store, 5).await;
    let room = room(&app.store, 2).await;
    eligible_user(&app.store, 1).await;
    eligible_user(&app.store, 2).await;
    let owner = app.token_for(1).await;
    let intruder = app.token_for(2).await;
    let (_, owned) = app
        .request(
            Method::POST,
            "/api/booking",
            Some(&owner),
            Some(json!({ "roomId": room.id })),
        )
        .await;
    app.request(
        Method::POST,
        "/api/booking",
        Some(&intruder),
        Some(json!({ "roomId": room.id })),
    )
    .await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/booking/{}", owned["bookingId"]),
            Some(&intruder),
            Some(json!({ "roomId": target.id })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.bookings_in_room(room.id).await, 2);
}

#[tokio::test]
async fn hotels_require_hotel_ticket() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    user_with_ticket(&app.store, 1, TicketStatus::Paid, true, false).await;
    room(&app.store, 1).await;

    let (status, _) = app
        .request(Method::GET, "/api/hotels", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
async fn hotels_and_rooms() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;
    let room = room(&app.store, 2).await;

    let (status, hotels) = app
        .request(Method::GET, "/api/hotels", Some(&token), None)
        .await;
    let (rooms_status, hotel) = app
        .request(
            Method::GET,
            &format!("/api/hotels/{}", room.hotel_id),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotels.as_array().unwrap().len(), 1);
    assert_eq!(rooms_status, StatusCode::OK);
    assert_eq!(hotel["rooms"][0]["id"], json!(room.id));
    assert_eq!(hotel["rooms"][0]["bookingCount"], json!(0));
}

#[tokio::test]
async fn unknown_hotel() {
    let app = TestApp::new();
    let token = app.token_for(1).await;
    eligible_user(&app.store, 1).await;

    let (status, _) = app
        .request(Method::GET, "/api/hotels/4242", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
