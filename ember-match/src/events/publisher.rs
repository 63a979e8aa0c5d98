use uuid::Uuid;

use ember_shared::clients::rabbitmq::RabbitMQClient;
use ember_shared::types::event::{payloads, routing_keys, Event};

pub async fn publish_profile_created(rabbitmq: &RabbitMQClient, user_id: Uuid, profile_id: Uuid) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_PROFILE_CREATED,
        payloads::ProfileCreated { user_id, profile_id },
    )
    .with_user(user_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_PROFILE_CREATED, &event).await {
        tracing::error!(error = %e, "failed to publish profile.created event");
    }
}

pub async fn publish_profile_updated(rabbitmq: &RabbitMQClient, user_id: Uuid, profile_id: Uuid) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_PROFILE_UPDATED,
        payloads::ProfileUpdated { user_id, profile_id },
    )
    .with_user(user_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_PROFILE_UPDATED, &event).await {
        tracing::error!(error = %e, "failed to publish profile.updated event");
    }
}

pub async fn publish_like_sent(rabbitmq: &RabbitMQClient, liker_id: Uuid, liked_id: Uuid) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_LIKE_SENT,
        payloads::LikeSent { liker_id, liked_id },
    )
    .with_user(liker_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_LIKE_SENT, &event).await {
        tracing::error!(error = %e, "failed to publish like.sent event");
    }
}

pub async fn publish_like_removed(rabbitmq: &RabbitMQClient, liker_id: Uuid, liked_id: Uuid) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_LIKE_REMOVED,
        payloads::LikeRemoved { liker_id, liked_id },
    )
    .with_user(liker_id);

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_LIKE_REMOVED, &event).await {
        tracing::error!(error = %e, "failed to publish like.removed event");
    }
}

pub async fn publish_match_created(
    rabbitmq: &RabbitMQClient,
    match_id: Uuid,
    user_a_id: Uuid,
    user_b_id: Uuid,
) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_MATCH_CREATED,
        payloads::MatchCreated {
            match_id,
            user_a_id,
            user_b_id,
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_MATCH_CREATED, &event).await {
        tracing::error!(error = %e, "failed to publish match.created event");
    }
}

pub async fn publish_match_dissolved(
    rabbitmq: &RabbitMQClient,
    match_id: Uuid,
    user_a_id: Uuid,
    user_b_id: Uuid,
) {
    let event = Event::new(
        "ember-match",
        routing_keys::MATCH_MATCH_DISSOLVED,
        payloads::MatchDissolved {
            match_id,
            user_a_id,
            user_b_id,
        },
    );

    if let Err(e) = rabbitmq.publish(routing_keys::MATCH_MATCH_DISSOLVED, &event).await {
        tracing::error!(error = %e, "failed to publish match.dissolved event");
    }
}
