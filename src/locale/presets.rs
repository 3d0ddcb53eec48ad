//! Built-in locale definitions

use super::{Locale, LocaleFormats, Ordinal};

fn names<const N: usize>(src: [&str; N]) -> [String; N] {
    src.map(String::from)
}

pub fn english() -> Locale {
    Locale {
        name: "en".to_string(),
        months: names([
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ]),
        months_short: names(["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]),
        weekdays: names(["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
        weekdays_short: names(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
        weekdays_min: names(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
        week_start: 0,
        formats: LocaleFormats {
            lt: "h:mm A".to_string(),
            lts: "h:mm:ss A".to_string(),
            l: "MM/DD/YYYY".to_string(),
            ll: "MMMM D, YYYY".to_string(),
            lll: "MMMM D, YYYY h:mm A".to_string(),
            llll: "dddd, MMMM D, YYYY h:mm A".to_string(),
        },
        ordinal: Ordinal::English,
    }
}

pub fn german() -> Locale {
    Locale {
        name: "de".to_string(),
        months: names([
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ]),
        months_short: names([
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
        ]),
        weekdays: names(["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"]),
        weekdays_short: names(["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."]),
        weekdays_min: names(["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]),
        week_start: 1,
        formats: LocaleFormats {
            lt: "HH:mm".to_string(),
            lts: "HH:mm:ss".to_string(),
            l: "DD.MM.YYYY".to_string(),
            ll: "D. MMMM YYYY".to_string(),
            lll: "D. MMMM YYYY HH:mm".to_string(),
            llll: "dddd, D. MMMM YYYY HH:mm".to_string(),
        },
        ordinal: Ordinal::Period,
    }
}

pub fn french() -> Locale {
    Locale {
        name: "fr".to_string(),
        months: names([
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ]),
        months_short: names([
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
        ]),
        weekdays: names(["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"]),
        weekdays_short: names(["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]),
        weekdays_min: names(["di", "lu", "ma", "me", "je", "ve", "sa"]),
        week_start: 1,
        formats: LocaleFormats {
            lt: "HH:mm".to_string(),
            lts: "HH:mm:ss".to_string(),
            l: "DD/MM/YYYY".to_string(),
            ll: "D MMMM YYYY".to_string(),
            lll: "D MMMM YYYY HH:mm".to_string(),
            llll: "dddd D MMMM YYYY HH:mm".to_string(),
        },
        ordinal: Ordinal::French,
    }
}

pub fn italian() -> Locale {
    Locale {
        name: "it".to_string(),
        months: names([
            "gennaio",
            "febbraio",
            "marzo",
            "aprile",
            "maggio",
            "giugno",
            "luglio",
            "agosto",
            "settembre",
            "ottobre",
            "novembre",
            "dicembre",
        ]),
        months_short: names(["gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic"]),
        weekdays: names(["domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato"]),
        weekdays_short: names(["dom", "lun", "mar", "mer", "gio", "ven", "sab"]),
        weekdays_min: names(["do", "lu", "ma", "me", "gi", "ve", "sa"]),
        week_start: 1,
        formats: LocaleFormats {
            lt: "HH:mm".to_string(),
            lts: "HH:mm:ss".to_string(),
            l: "DD/MM/YYYY".to_string(),
            ll: "D MMMM YYYY".to_string(),
            lll: "D MMMM YYYY HH:mm".to_string(),
            llll: "dddd D MMMM YYYY HH:mm".to_string(),
        },
        ordinal: Ordinal::Masculine,
    }
}

/// All built-in locales
pub fn all() -> Vec<Locale> {
    vec![english(), german(), french(), italian()]
}
