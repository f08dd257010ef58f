//! Shared fixtures for the end-to-end tests
//!
//! A small library catalogue: one app with a few parameters and a record
//! per book. `v_pages` is Null for the Euclid record so Null placement in
//! orderings can be observed.

use std::sync::Arc;
use vsql::{App, Date, Environment, Record, User, VsqlValue};

pub fn library_app() -> Arc<App> {
    Arc::new(
        App::new("app_library")
            .with_param("p_name", VsqlValue::Str("City Library".into()))
            .with_param("p_fee_per_day", VsqlValue::Number(0.5))
            .with_param(
                "p_founded",
                VsqlValue::Date(Date::from_ymd(1898, 10, 1).unwrap()),
            ),
    )
}

fn book(id: &str, title: &str, author: &str, year: i64, pages: Option<i64>) -> Arc<Record> {
    Arc::new(
        Record::new(id)
            .with_field("v_title", VsqlValue::Str(title.into()))
            .with_field("v_author", VsqlValue::Str(author.into()))
            .with_field("v_year", VsqlValue::Int(year))
            .with_field("v_pages", pages.map_or(VsqlValue::Null, VsqlValue::Int)),
    )
}

/// Five books in acquisition order.
pub fn library_books() -> Vec<Arc<Record>> {
    vec![
        book("rec_elements", "Elements", "Euclid", -300, None),
        book("rec_sidereus", "Sidereus Nuncius", "Galilei", 1610, Some(60)),
        book("rec_principia", "Principia", "Newton", 1687, Some(510)),
        book(
            "rec_disquisitiones",
            "Disquisitiones Arithmeticae",
            "Gauss",
            1801,
            Some(478),
        ),
        book("rec_origin", "On the Origin of Species", "Darwin", 1859, Some(502)),
    ]
}

pub fn librarian() -> Arc<User> {
    let mut user = User::new("ada@example.org");
    user.id = Some("user_ada".into());
    user.firstname = Some("Ada".into());
    user.lastname = Some("Lovelace".into());
    Arc::new(user)
}

/// Environment with the app, the librarian and the Principia record.
pub fn library_env() -> Environment {
    let app = library_app();
    let record = Arc::new(
        Record::new("rec_principia")
            .with_app(Arc::clone(&app))
            .with_field("v_title", VsqlValue::Str("Principia".into()))
            .with_field("v_author", VsqlValue::Str("Newton".into()))
            .with_field("v_year", VsqlValue::Int(1687))
            .with_field("v_pages", VsqlValue::Int(510)),
    );
    Environment::new()
        .with_app(app)
        .with_user(librarian())
        .with_record(record)
}
