use orgvault_core::{
    Membership, MembershipStatus, Organization, PoliciesByUserId, Policy, PolicyKind,
    PolicyService, Query, Repository, SessionFactory, SqliteRepository, User,
};

struct Fixture {
    sessions: SessionFactory,
    users: SqliteRepository<User>,
    orgs: SqliteRepository<Organization>,
    memberships: SqliteRepository<Membership>,
    policies: SqliteRepository<Policy>,
}

impl Fixture {
    fn new() -> Self {
        let sessions = SessionFactory::in_memory().unwrap();
        Self {
            users: SqliteRepository::new(sessions.clone()),
            orgs: SqliteRepository::new(sessions.clone()),
            memberships: SqliteRepository::new(sessions.clone()),
            policies: SqliteRepository::new(sessions.clone()),
            sessions,
        }
    }

    fn confirmed_membership(&self, org: &Organization, user: &User) -> Membership {
        let mut membership = Membership::invite(org.id, user.id);
        membership.transition_to(MembershipStatus::Accepted).unwrap();
        membership
            .transition_to(MembershipStatus::Confirmed)
            .unwrap();
        self.memberships.create(&membership).unwrap();
        membership
    }
}

#[test]
fn only_confirmed_membership_in_enabled_org_yields_policies() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();

    // Confirmed member of enabled org O holding policy P1.
    let org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();
    fixture.confirmed_membership(&org, &user);
    let p1 = Policy::new(org.id, PolicyKind::TwoFactor);
    fixture.policies.create(&p1).unwrap();

    // Only invited to org O2 holding policy P2.
    let org2 = Organization::new("O2");
    fixture.orgs.create(&org2).unwrap();
    fixture
        .memberships
        .create(&Membership::invite(org2.id, user.id))
        .unwrap();
    let p2 = Policy::new(org2.id, PolicyKind::MasterPassword);
    fixture.policies.create(&p2).unwrap();

    let in_force = PolicyService::new(fixture.sessions.clone())
        .policies_for_user(user.id)
        .unwrap();
    assert_eq!(in_force.len(), 1);
    assert_eq!(in_force[0].id, p1.id);
}

#[test]
fn disabling_the_organization_removes_its_policies_from_resolution() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();
    let mut org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();
    fixture.confirmed_membership(&org, &user);
    let policy = Policy::new(org.id, PolicyKind::TwoFactor);
    fixture.policies.create(&policy).unwrap();

    let service = PolicyService::new(fixture.sessions.clone());
    assert_eq!(service.policies_for_user(user.id).unwrap().len(), 1);

    // Suspend the tenant; the membership itself stays confirmed.
    org.enabled = false;
    fixture.orgs.replace(&org).unwrap();

    assert!(service.policies_for_user(user.id).unwrap().is_empty());
}

#[test]
fn demoting_the_membership_removes_policies_from_resolution() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();
    let org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();
    let mut membership = fixture.confirmed_membership(&org, &user);
    let policy = Policy::new(org.id, PolicyKind::SingleOrganization);
    fixture.policies.create(&policy).unwrap();

    let service = PolicyService::new(fixture.sessions.clone());
    assert_eq!(service.policies_for_user(user.id).unwrap().len(), 1);

    membership
        .transition_to(MembershipStatus::Revoked)
        .unwrap();
    fixture.memberships.replace(&membership).unwrap();

    assert!(service.policies_for_user(user.id).unwrap().is_empty());
}

#[test]
fn accepted_but_not_confirmed_membership_is_excluded() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();
    let org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();

    let mut membership = Membership::invite(org.id, user.id);
    membership.transition_to(MembershipStatus::Accepted).unwrap();
    fixture.memberships.create(&membership).unwrap();
    fixture
        .policies
        .create(&Policy::new(org.id, PolicyKind::TwoFactor))
        .unwrap();

    let service = PolicyService::new(fixture.sessions.clone());
    assert!(service.policies_for_user(user.id).unwrap().is_empty());
}

#[test]
fn policies_accumulate_across_all_qualifying_organizations() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();

    let mut expected = Vec::new();
    for name in ["First", "Second"] {
        let org = Organization::new(name);
        fixture.orgs.create(&org).unwrap();
        fixture.confirmed_membership(&org, &user);
        let policy = Policy::new(org.id, PolicyKind::ResetPassword);
        fixture.policies.create(&policy).unwrap();
        expected.push(policy.id);
    }

    let mut in_force: Vec<_> = PolicyService::new(fixture.sessions.clone())
        .policies_for_user(user.id)
        .unwrap()
        .into_iter()
        .map(|policy| policy.id)
        .collect();
    in_force.sort();
    expected.sort();
    assert_eq!(in_force, expected);
}

#[test]
fn query_object_runs_standalone_against_a_session() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();
    let org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();
    fixture.confirmed_membership(&org, &user);
    let policy = Policy::new(org.id, PolicyKind::MasterPassword);
    fixture.policies.create(&policy).unwrap();

    let session = fixture.sessions.scope().unwrap();
    let in_force = PoliciesByUserId::new(user.id).run(&session).unwrap();
    assert_eq!(in_force.len(), 1);
    assert_eq!(in_force[0], policy);
}

#[test]
fn disabled_policies_resolve_but_do_not_apply() {
    let fixture = Fixture::new();

    let user = User::new("u@example.com", "U");
    fixture.users.create(&user).unwrap();
    let org = Organization::new("O");
    fixture.orgs.create(&org).unwrap();
    fixture.confirmed_membership(&org, &user);

    let mut policy = Policy::new(org.id, PolicyKind::TwoFactor);
    policy.enabled = false;
    fixture.policies.create(&policy).unwrap();

    let service = PolicyService::new(fixture.sessions.clone());
    // The resolution query returns the disabled policy...
    assert_eq!(service.policies_for_user(user.id).unwrap().len(), 1);
    // ...but enforcement ignores it.
    assert!(!service
        .policy_applies_to_user(user.id, PolicyKind::TwoFactor)
        .unwrap());
}
