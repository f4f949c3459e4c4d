//! Seed data for mock mode
//!
//! Every fixture list is owned by `user@example.com` (member id "1").

use crate::domain::{Item, Member, ShoppingList};

fn item(name: &str, completed: bool) -> Item {
    Item {
        completed,
        ..Item::new(name)
    }
}

fn member(id: &str, email: &str) -> Member {
    Member {
        id: id.to_string(),
        email: email.to_string(),
        is_owner: false,
    }
}

fn list(id: u64, name: &str, items: Vec<Item>, archived: bool, guests: Vec<Member>) -> ShoppingList {
    let mut members = vec![Member::owner("1", "user@example.com")];
    members.extend(guests);
    ShoppingList {
        id,
        name: name.to_string(),
        items,
        archived,
        members,
    }
}

pub fn seed_lists() -> Vec<ShoppingList> {
    vec![
        list(
            1,
            "Zelenina na smoothie",
            vec![
                item("Mrkev", false),
                item("Špenát", false),
                item("Paprika", true),
                item("Rajčata", false),
                item("Česnek", true),
            ],
            false,
            vec![member("2", "zdravakamoska@example.com")],
        ),
        list(
            2,
            "Knihy na dovolenou",
            vec![
                item("1984", false),
                item("Malý princ", true),
                item("Pýcha a předsudek", false),
                item("Jak na to", false),
            ],
            false,
            vec![
                member("3", "knihomol@example.com"),
                member("4", "plazovylenochal@example.com"),
            ],
        ),
        list(
            3,
            "Jezdecké vybavení",
            vec![
                item("Jezdecká helma", false),
                item("Jezdecké boty", true),
                item("Jezdecké kalhoty", false),
                item("Úrazové pojištění", false),
                item("Uzděčka", true),
                item("Čištění na koně", false),
                item("Pamlsky pro koně", true),
            ],
            false,
            vec![member("5", "koninadruhoumoc@example.com")],
        ),
        list(
            4,
            "Kempovací vybavení",
            vec![
                item("Stan", false),
                item("Spacák", false),
                item("Baterka", true),
                item("Lékárnička", false),
                item("Pláštěnka", false),
            ],
            false,
            vec![member("6", "outdoorprogrammer@example.com")],
        ),
        list(
            5,
            "Starý nákup",
            vec![
                item("Věci co jsem stejně nekoupil", true),
                item("Věci co jsem ztratil cestou domů", true),
            ],
            true,
            vec![],
        ),
    ]
}
