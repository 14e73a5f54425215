use super::*;

#[test]
fn role_parses_known_names_only() {
    assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
    assert_eq!("CUSTOMER".parse::<Role>(), Ok(Role::Customer));
    assert_eq!("GUEST".parse::<Role>(), Err(RoleParseError("GUEST".to_owned())));
    assert!("admin".parse::<Role>().is_err());
}

#[test]
fn role_serializes_upper_case() {
    assert_eq!(serde_json::to_value(Role::Admin).expect("json"), serde_json::json!("ADMIN"));
    assert_eq!(Role::Customer.to_string(), "CUSTOMER");
}

#[test]
fn auth_response_reads_full_login_payload() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "accessToken": "A1",
        "refreshToken": "R1",
        "userId": "6f1c1c1e-2d1a-4d55-9d0e-0c7b9a7d3f10",
        "email": "nimal@example.lk",
        "role": "CUSTOMER",
        "fullName": "Nimal Perera"
    }))
    .expect("login payload");
    assert_eq!(resp.access_token, "A1");
    assert_eq!(resp.refresh_token.as_deref(), Some("R1"));
    assert_eq!(resp.role.as_deref(), Some("CUSTOMER"));
    assert_eq!(resp.full_name.as_deref(), Some("Nimal Perera"));
}

#[test]
fn auth_response_accepts_refresh_with_access_token_only() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({ "accessToken": "A2" })).expect("refresh payload");
    assert_eq!(resp.access_token, "A2");
    assert!(resp.refresh_token.is_none());
    assert!(resp.role.is_none());
}

#[test]
fn auth_response_accepts_legacy_token_field() {
    let resp: AuthResponse =
        serde_json::from_value(serde_json::json!({ "token": "legacy", "role": "ADMIN" })).expect("legacy payload");
    assert_eq!(resp.access_token, "legacy");
}

#[test]
fn signup_request_uses_camel_case() {
    let body = serde_json::to_value(SignUpRequest {
        full_name: "Kamala Silva".to_owned(),
        phone: "0771234567".to_owned(),
        email: "kamala@example.lk".to_owned(),
        password: "secret-pass".to_owned(),
    })
    .expect("json");
    assert_eq!(body["fullName"], "Kamala Silva");
    assert!(body.get("full_name").is_none());
}

#[test]
fn user_summary_reads_deleted_flag_under_either_name() {
    let base = serde_json::json!({
        "userId": "6f1c1c1e-2d1a-4d55-9d0e-0c7b9a7d3f10",
        "email": "a@b.lk",
        "fullName": "A B",
        "role": "CUSTOMER",
    });

    let mut with_deleted = base.clone();
    with_deleted["deleted"] = serde_json::json!(true);
    let user: UserSummary = serde_json::from_value(with_deleted).expect("deleted");
    assert!(user.deleted);

    let mut with_is_deleted = base.clone();
    with_is_deleted["isDeleted"] = serde_json::json!(true);
    let user: UserSummary = serde_json::from_value(with_is_deleted).expect("isDeleted");
    assert!(user.deleted);

    let user: UserSummary = serde_json::from_value(base).expect("default");
    assert!(!user.deleted);
}

#[test]
fn update_user_request_omits_blank_optionals() {
    let body = serde_json::to_value(UpdateUserRequest {
        full_name: "A B".to_owned(),
        phone: "0771234567".to_owned(),
        role: None,
        password: None,
    })
    .expect("json");
    assert!(body.get("password").is_none());
    assert!(body.get("role").is_none());
}

#[test]
fn special_package_request_names_discount_percentage() {
    let body = serde_json::to_value(SpecialPackageRequest {
        name: "Royal".to_owned(),
        description: "Full kandyan set".to_owned(),
        free_of_charge_items: None,
        price: 150_000.0,
        discount_percentage: 10.0,
    })
    .expect("json");
    assert_eq!(body["discountPercentage"], 10.0);
    assert!(body.get("freeOfChargeItems").is_none());
}
