//! Cross-country training routes departing Moorabbin, Victoria.

#![expect(clippy::unreadable_literal, reason = "packed coordinates as printed in the ERSA")]

use std::collections::BTreeMap;

use store::Coordinate;

#[must_use]
pub fn file() -> store::File {
    store::File {
        meta:          store::Meta {
            id:          "victoria".into(),
            title:       "Victoria NAV routes".into(),
            description: "Cross-country navigation exercises from Moorabbin (YMMB).".into(),
            authors:     Vec::new(),
        },
        points:        store::Points { airfields: airfields(), waypoints: waypoints() },
        routes:        routes(),
        default_route: "NAV1".into(),
        overlay:       store::OverlaySettings::default(),
    }
}

fn dms_table(entries: &[(&str, i32, i32)]) -> BTreeMap<String, Coordinate> {
    entries
        .iter()
        .map(|&(name, lon, lat)| (name.to_owned(), Coordinate::Dms { lon, lat }))
        .collect()
}

fn airfields() -> BTreeMap<String, Coordinate> {
    dms_table(&[
        ("YBDG", 1441947, -364422),
        ("YBLT", 1434728, -373042),
        ("YBSS", 1442520, -374400),
        ("YDRN", 1454946, -381232),
        ("YLEG", 1455135, -382944),
        ("YLTV", 1462813, -381226),
        ("YMAV", 1442810, -380222),
        ("YMBU", 1434232, -370159),
        ("YMEN", 1445407, -374341),
        ("YMFD", 1460700, -370400),
        ("YMMB", 1450608, -375833),
        ("YMNG", 1451103, -365318),
        ("YOLA", 1434047, -381711),
        ("YSHT", 1452333, -362544),
        ("YSTA", 1431109, -363812),
        ("YTDN", 1452525, -381256),
        ("YWBL", 1422648, -381743),
        ("YYRM", 1464516, -383403),
    ])
}

fn waypoints() -> BTreeMap<String, Coordinate> {
    dms_table(&[
        ("APL", 1445830, -375210),
        ("BMP", 1442620, -374030),
        ("CARE", 1452500, -375730),
        ("CARR", 1450710, -380427),
        ("GMH", 1451420, -380030),
        ("KIM", 1445715, -371800),
        ("KTN", 1442730, -371450),
        ("MHT", 1445900, -381900),
        ("PIPS", 1443800, -381736),
        ("SGSV", 1451800, -374030),
        ("TON", 1444519, -375119),
        ("WBER", 1443830, -375400),
        ("WMS", 1445440, -375210),
    ])
}

fn route(id: &str, points: &[&str]) -> store::Route {
    store::Route { id: id.into(), points: points.iter().map(|&point| point.into()).collect() }
}

fn routes() -> Vec<store::Route> {
    vec![
        route("NAV1", &["YMMB", "YLEG", "YLTV", "GMH", "YMMB"]),
        route("NAV2", &["YMMB", "SGSV", "KIM", "YBDG", "KTN", "BMP", "TON", "WMS", "YMMB"]),
        route(
            "NAV3",
            &["YMMB", "APL", "TON", "WBER", "YMAV", "YOLA", "YWBL", "PIPS", "MHT", "CARR", "YMMB"],
        ),
        route("NAV4", &["YMMB", "YLTV", "YYRM", "YLEG", "GMH", "YMMB"]),
        route("NAV5", &["YMMB", "YLTV", "YLEG", "YMMB"]),
        route("NAV6", &["YMMB", "APL", "YMEN", "CARE", "YMMB"]),
        route("NAV7", &["YMMB", "YMEN", "YBSS", "YBLT", "YOLA", "YMAV", "YMMB"]),
        route("NAV8", &["YMMB", "YMEN", "YSHT", "YMFD", "YMNG", "YMMB"]),
        route("NAV9", &["YMMB", "YSHT", "YBDG", "YMMB"]),
        route("NAV10", &["YMMB", "YMEN", "YBDG", "YSTA", "YMBU", "YMMB"]),
    ]
}
