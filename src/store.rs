use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    subscriber::Subscriber, subscriber_email::SubscriberEmail,
    subscription_flags::SubscriptionFlags,
};

fn map_subscriber_row(row: PgRow) -> Subscriber {
    Subscriber {
        email: SubscriberEmail::parse(row.get("email")).unwrap(),
        flags: SubscriptionFlags {
            daily_newsletter: row.get("daily_newsletter"),
            advertising_updates: row.get("advertising_updates"),
            weekin_review: row.get("weekin_review"),
            event_updates: row.get("event_updates"),
            startup_weekly: row.get("startup_weekly"),
            podcasts: row.get("podcasts"),
        },
    }
}

#[tracing::instrument(name = "Find a subscriber by email", skip(db_pool))]
pub async fn find_subscriber_by_email(
    db_pool: &PgPool,
    email: &str,
) -> Result<Option<Subscriber>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT email, daily_newsletter, advertising_updates, weekin_review,
               event_updates, startup_weekly, podcasts
        FROM subscribers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .map(map_subscriber_row)
    .fetch_optional(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })
}

#[tracing::instrument(
    name = "Insert a new subscriber into the database",
    skip(db_pool, new_subscriber),
    fields(subscriber_email = %new_subscriber.email.as_ref())
)]
pub async fn insert_subscriber(
    db_pool: &PgPool,
    new_subscriber: &Subscriber,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO subscribers (email, daily_newsletter, advertising_updates,
                                 weekin_review, event_updates, startup_weekly, podcasts)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(new_subscriber.email.as_ref())
    .bind(new_subscriber.flags.daily_newsletter)
    .bind(new_subscriber.flags.advertising_updates)
    .bind(new_subscriber.flags.weekin_review)
    .bind(new_subscriber.flags.event_updates)
    .bind(new_subscriber.flags.startup_weekly)
    .bind(new_subscriber.flags.podcasts)
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    Ok(())
}

/// Overwrites all six subscription flags of an existing record. There are no
/// partial-field semantics.
#[tracing::instrument(
    name = "Update the subscription flags of a subscriber",
    skip(db_pool, flags),
    fields(subscriber_email = %email.as_ref())
)]
pub async fn update_subscriber_flags(
    db_pool: &PgPool,
    email: &SubscriberEmail,
    flags: &SubscriptionFlags,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE subscribers
        SET daily_newsletter = $2, advertising_updates = $3, weekin_review = $4,
            event_updates = $5, startup_weekly = $6, podcasts = $7
        WHERE email = $1
        "#,
    )
    .bind(email.as_ref())
    .bind(flags.daily_newsletter)
    .bind(flags.advertising_updates)
    .bind(flags.weekin_review)
    .bind(flags.event_updates)
    .bind(flags.startup_weekly)
    .bind(flags.podcasts)
    .execute(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })?;

    Ok(())
}

#[tracing::instrument(
    name = "Delete a subscriber",
    skip(db_pool),
    fields(subscriber_email = %email.as_ref())
)]
pub async fn delete_subscriber(
    db_pool: &PgPool,
    email: &SubscriberEmail,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM subscribers WHERE email = $1")
        .bind(email.as_ref())
        .execute(db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

    Ok(())
}

#[tracing::instrument(name = "List all subscribers", skip(db_pool))]
pub async fn list_subscribers(db_pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT email, daily_newsletter, advertising_updates, weekin_review,
               event_updates, startup_weekly, podcasts
        FROM subscribers
        "#,
    )
    .map(map_subscriber_row)
    .fetch_all(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })
}
