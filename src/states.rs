//! Default US-state layout and label table.

/// Box positions `(x, y, id)` for the 50 states plus DC.
pub const US_LAYOUT: &[(u32, u32, &str)] = &[
    (0, 0, "AK"),
    (10, 0, "ME"),
    (9, 1, "VT"),
    (10, 1, "NH"),
    (0, 2, "WA"),
    (1, 2, "ID"),
    (2, 2, "MT"),
    (3, 2, "ND"),
    (4, 2, "MN"),
    (6, 2, "MI"),
    (8, 2, "NY"),
    (9, 2, "MA"),
    (10, 2, "RI"),
    (0, 3, "OR"),
    (1, 3, "UT"),
    (2, 3, "WY"),
    (3, 3, "SD"),
    (4, 3, "IA"),
    (5, 3, "WI"),
    (6, 3, "IN"),
    (7, 3, "OH"),
    (8, 3, "PA"),
    (9, 3, "NJ"),
    (10, 3, "CT"),
    (0, 4, "CA"),
    (1, 4, "NV"),
    (2, 4, "CO"),
    (3, 4, "NE"),
    (4, 4, "MO"),
    (5, 4, "IL"),
    (6, 4, "KY"),
    (7, 4, "WV"),
    (8, 4, "VA"),
    (9, 4, "MD"),
    (10, 4, "DE"),
    (1, 5, "AZ"),
    (2, 5, "NM"),
    (3, 5, "KS"),
    (4, 5, "AR"),
    (5, 5, "TN"),
    (6, 5, "NC"),
    (7, 5, "SC"),
    (8, 5, "DC"),
    (3, 6, "OK"),
    (4, 6, "LA"),
    (5, 6, "MS"),
    (6, 6, "AL"),
    (7, 6, "GA"),
    (0, 7, "HI"),
    (3, 7, "TX"),
    (8, 7, "FL"),
];

/// `(id, full, short, ap)` label variants for every id in [`US_LAYOUT`].
pub const US_LABELS: &[(&str, &str, &str, &str)] = &[
    ("AK", "Alaska", "AK", "Alaska"),
    ("AL", "Alabama", "AL", "Ala."),
    ("AR", "Arkansas", "AR", "Ark."),
    ("AZ", "Arizona", "AZ", "Ariz."),
    ("CA", "California", "CA", "Calif."),
    ("CO", "Colorado", "CO", "Colo."),
    ("CT", "Connecticut", "CT", "Conn."),
    ("DC", "District of Columbia", "DC", "D.C."),
    ("DE", "Delaware", "DE", "Del."),
    ("FL", "Florida", "FL", "Fla."),
    ("GA", "Georgia", "GA", "Ga."),
    ("HI", "Hawaii", "HI", "Hawaii"),
    ("IA", "Iowa", "IA", "Iowa"),
    ("ID", "Idaho", "ID", "Idaho"),
    ("IL", "Illinois", "IL", "Ill."),
    ("IN", "Indiana", "IN", "Ind."),
    ("KS", "Kansas", "KS", "Kan."),
    ("KY", "Kentucky", "KY", "Ky."),
    ("LA", "Louisiana", "LA", "La."),
    ("MA", "Massachusetts", "MA", "Mass."),
    ("MD", "Maryland", "MD", "Md."),
    ("ME", "Maine", "ME", "Maine"),
    ("MI", "Michigan", "MI", "Mich."),
    ("MN", "Minnesota", "MN", "Minn."),
    ("MO", "Missouri", "MO", "Mo."),
    ("MS", "Mississippi", "MS", "Miss."),
    ("MT", "Montana", "MT", "Mont."),
    ("NC", "North Carolina", "NC", "N.C."),
    ("ND", "North Dakota", "ND", "N.D."),
    ("NE", "Nebraska", "NE", "Neb."),
    ("NH", "New Hampshire", "NH", "N.H."),
    ("NJ", "New Jersey", "NJ", "N.J."),
    ("NM", "New Mexico", "NM", "N.M."),
    ("NV", "Nevada", "NV", "Nev."),
    ("NY", "New York", "NY", "N.Y."),
    ("OH", "Ohio", "OH", "Ohio"),
    ("OK", "Oklahoma", "OK", "Okla."),
    ("OR", "Oregon", "OR", "Ore."),
    ("PA", "Pennsylvania", "PA", "Pa."),
    ("RI", "Rhode Island", "RI", "R.I."),
    ("SC", "South Carolina", "SC", "S.C."),
    ("SD", "South Dakota", "SD", "S.D."),
    ("TN", "Tennessee", "TN", "Tenn."),
    ("TX", "Texas", "TX", "Texas"),
    ("UT", "Utah", "UT", "Utah"),
    ("VA", "Virginia", "VA", "Va."),
    ("VT", "Vermont", "VT", "Vt."),
    ("WA", "Washington", "WA", "Wash."),
    ("WI", "Wisconsin", "WI", "Wis."),
    ("WV", "West Virginia", "WV", "W.Va."),
    ("WY", "Wyoming", "WY", "Wyo."),
];
