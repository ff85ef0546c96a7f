use orgvault_core::{new_comb, Membership, Organization, Policy, PolicyKind};
use serde_json::json;

#[test]
fn policy_kind_serializes_snake_case_with_json_payload() {
    let org = Organization::new("O");
    let mut policy = Policy::new(org.id, PolicyKind::MasterPassword);
    policy.data = Some(json!({"min_length": 14}).to_string());

    let value = serde_json::to_value(&policy).unwrap();
    assert_eq!(value["kind"], "master_password");

    let payload: serde_json::Value =
        serde_json::from_str(policy.data.as_deref().unwrap()).unwrap();
    assert_eq!(payload["min_length"], 14);
}

#[test]
fn membership_roundtrips_through_json() {
    let membership = Membership::invite(new_comb(), new_comb());

    let text = serde_json::to_string(&membership).unwrap();
    assert!(text.contains("\"invited\""));

    let back: Membership = serde_json::from_str(&text).unwrap();
    assert_eq!(back, membership);
}
