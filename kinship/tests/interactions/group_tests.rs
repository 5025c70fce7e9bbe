use super::support::*;
use kinship::models::{GroupMember, GroupStats, MemberRole};

fn group(id: &str, members: &[&str]) -> Group {
    Group {
        key: EntityKey::new(id),
        name: format!("Group {id}"),
        members: members
            .iter()
            .map(|user| GroupMember {
                user: EntityRef::from_id(*user),
                role: MemberRole::Member,
                joined_at: None,
            })
            .collect(),
        stats: GroupStats {
            member_count: members.len() as u64,
            post_count: 0,
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn join_adds_member_and_takes_server_copy() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({
        "group": {
            "_id": "G1",
            "name": "Group G1",
            "members": [{ "user": "U2" }, { "user": "U1", "role": "member" }],
            "stats": { "memberCount": 2 }
        }
    })));
    let notifier = RecordingNotifier::default();
    let mut groups = vec![group("G1", &["U2"])];

    let outcome = Interactions::new(&client, &notifier)
        .join_group(&mut groups, "G1")
        .await
        .unwrap();

    assert_eq!(outcome, Reconciliation::Replaced(0));
    assert!(groups[0].is_member("U1"));
    assert_eq!(groups[0].stats.member_count, 2);
    assert_eq!(client.transport().requests()[0].path, "/groups/G1/join");
}

#[tokio::test]
async fn failed_leave_restores_membership() {
    let client = client_as("U1");
    client.transport().respond(server_error(403, "Admins cannot leave"));
    let notifier = RecordingNotifier::default();
    let original = vec![group("G1", &["U1", "U2"])];
    let mut groups = original.clone();

    let result = Interactions::new(&client, &notifier)
        .leave_group(&mut groups, "G1")
        .await;

    assert!(result.is_err());
    assert_eq!(groups, original);
    assert_eq!(notifier.messages(), vec!["Admins cannot leave"]);
}

#[tokio::test]
async fn toggle_membership_leaves_when_already_member() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "_id": "G1", "name": "Group G1", "members": [] })));
    let notifier = RecordingNotifier::default();
    let mut groups = vec![group("G1", &["U1"])];

    Interactions::new(&client, &notifier)
        .toggle_group_membership(&mut groups, "G1")
        .await
        .unwrap();

    assert!(!groups[0].is_member("U1"));
    assert_eq!(client.transport().requests()[0].path, "/groups/G1/leave");
}

#[tokio::test]
async fn confirmation_for_removed_group_is_dropped() {
    let client = client_as("U1");
    client.transport().respond(Ok(json!({ "_id": "G9", "name": "Elsewhere" })));
    let notifier = RecordingNotifier::default();
    let mut groups = vec![group("G1", &[])];

    let outcome = Interactions::new(&client, &notifier)
        .join_group(&mut groups, "G1")
        .await
        .unwrap();

    assert_eq!(outcome, Reconciliation::Dropped);
    assert_eq!(groups.len(), 1);
    assert!(notifier.messages().is_empty());
}
