use reqwest::Method;
use serde_json::json;
use session::Body;

use super::*;
use crate::services::fake;

#[tokio::test]
async fn list_categories_decodes_backend_shape() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(
        Method::GET,
        CATEGORIES_PATH,
        200,
        json!([{ "categoryId": "6f1c1c1e-2d1a-4d55-9d0e-0c7b9a7d3f10", "name": "Kandyan", "description": null }]),
    );

    let cats = list_categories(&state).await.expect("list");
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "Kandyan");
}

#[tokio::test]
async fn save_category_creates_or_updates() {
    let (state, backend) = fake::signed_in("ADMIN");
    let id = Uuid::new_v4();
    backend.on(Method::POST, CATEGORIES_PATH, 200, json!({}));
    backend.on(Method::PUT, &format!("{CATEGORIES_PATH}/{id}"), 200, json!({}));

    let created = save_category(&state, None, "Kandyan", Some("Bridal sets")).await.expect("create");
    assert_eq!(created.text, "Category created successfully");
    assert_eq!(backend.last().json(), json!({ "name": "Kandyan", "description": "Bridal sets" }));

    let updated = save_category(&state, Some(id), "Kandyan", None).await.expect("update");
    assert_eq!(updated.text, "Category updated successfully");
    assert_eq!(backend.last().json(), json!({ "name": "Kandyan" }));
}

#[tokio::test]
async fn save_category_conflict_uses_server_message() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(Method::POST, CATEGORIES_PATH, 409, json!({ "message": "Category already exists" }));

    let err = save_category(&state, None, "Kandyan", None).await.expect_err("conflict");
    assert_eq!(crate::services::failure_notice(&err, "Operation failed", false).text, "Category already exists");
}

#[tokio::test]
async fn save_dress_item_sends_multipart_request_and_image() {
    let (state, backend) = fake::signed_in("ADMIN");
    backend.on(Method::POST, DRESS_ITEMS_PATH, 200, json!({}));
    let category_id = Uuid::new_v4();

    let form = DressItemForm {
        name: "Osariya".to_owned(),
        category_id: Some(category_id),
        quantity_adult: Some(3),
        ..Default::default()
    };
    let image = ImageUpload::new("osariya.JPG", vec![0xff, 0xd8]);
    let notice = save_dress_item(&state, None, &form, Some(image)).await.expect("created");
    assert_eq!(notice.text, "Dress item created successfully");

    let Body::Multipart(parts) = backend.last().body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name, "request");
    assert_eq!(parts[0].content_type, "application/json");
    let request: serde_json::Value = serde_json::from_slice(&parts[0].bytes).expect("json part");
    assert_eq!(request["dressItemName"], "Osariya");
    assert_eq!(request["quantityPageBoys"], 0);
    assert_eq!(parts[1].name, "image");
    assert_eq!(parts[1].content_type, "image/jpeg");
    assert_eq!(parts[1].file_name.as_deref(), Some("osariya.JPG"));
}

#[tokio::test]
async fn dress_item_without_category_is_rejected_locally() {
    let (state, backend) = fake::signed_in("ADMIN");
    let form = DressItemForm { name: "Osariya".to_owned(), ..Default::default() };
    let err = save_dress_item(&state, None, &form, None).await.expect_err("no category");
    assert_eq!(
        crate::services::failure_notice(&err, DRESS_ITEM_SAVE_FAILED, false).text,
        "Dress name and category are required"
    );
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn delete_dress_item_hits_item_path() {
    let (state, backend) = fake::signed_in("ADMIN");
    let id = Uuid::new_v4();
    backend.on(Method::DELETE, &format!("{DRESS_ITEMS_PATH}/{id}"), 204, serde_json::Value::Null);

    let notice = delete_dress_item(&state, id).await.expect("deleted");
    assert_eq!(notice.text, "Dress item deleted successfully");
}

#[test]
fn image_upload_guesses_content_type() {
    assert_eq!(ImageUpload::new("a.png", Vec::new()).content_type, "image/png");
    assert_eq!(ImageUpload::new("a", Vec::new()).content_type, "application/octet-stream");
}
