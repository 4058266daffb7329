// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Brazilian-flavoured fake values: person names, emails, phone numbers,
//! company names and dates.

use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};
use time::{Date, Month};

const FIRST_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Bruno", "Camila", "Carlos", "Daniel", "Eduarda", "Fernanda", "Gabriel",
    "Helena", "Igor", "Isabela", "João", "Júlia", "Larissa", "Lucas", "Luiza", "Marcelo", "Maria",
    "Mateus", "Otávio", "Paulo", "Rafael", "Sofia", "Thiago", "Valentina", "Vinícius",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Araújo", "Barbosa", "Cardoso", "Carvalho", "Castro", "Costa", "Dias", "Fernandes",
    "Ferreira", "Gomes", "Lima", "Martins", "Melo", "Moreira", "Nascimento", "Oliveira", "Pereira",
    "Ribeiro", "Rocha", "Rodrigues", "Santos", "Silva", "Souza", "Teixeira",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "yahoo.com.br",
    "uol.com.br",
    "bol.com.br",
    "outlook.com",
];

const COMPANY_SUFFIXES: &[&str] = &["S.A.", "Ltda.", "S/A", "EI", "e Filhos", "Comércio"];

const AREA_CODES: &[u32] = &[11, 21, 31, 41, 47, 51, 61, 71, 81, 85, 91, 92];

fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// A full person name, e.g. "Júlia Ribeiro".
pub fn person_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn ascii_fold(c: char) -> Option<char> {
    let folded: char = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'ê' | 'è' => 'e',
        'í' | 'ì' => 'i',
        'ó' | 'ô' | 'õ' | 'ò' => 'o',
        'ú' | 'ü' | 'ù' => 'u',
        'ç' => 'c',
        c if c.is_ascii_alphanumeric() => c,
        _ => return None,
    };
    Some(folded)
}

/// An email address derived from `name`, e.g. "julia.ribeiro42@uol.com.br".
pub fn email<R: Rng>(rng: &mut R, name: &str) -> String {
    let local: Vec<String> = name
        .split_whitespace()
        .map(|part| {
            part.to_lowercase()
                .chars()
                .filter_map(ascii_fold)
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect();
    let local: String = if local.is_empty() {
        String::from("cliente")
    } else {
        local.join(".")
    };

    // Numeric tag separates namesakes
    let tag: u32 = rng.random_range(1..=99);
    format!("{local}{tag}@{}", pick(rng, EMAIL_DOMAINS))
}

/// A mobile number in the form `+55 (DD) 9XXXX-XXXX`.
pub fn phone<R: Rng>(rng: &mut R) -> String {
    let area: u32 = AREA_CODES.choose(rng).copied().unwrap_or(11);
    let prefix: u32 = rng.random_range(0..10_000);
    let line: u32 = rng.random_range(0..10_000);
    format!("+55 ({area}) 9{prefix:04}-{line:04}")
}

/// A company name, e.g. "Costa Barbosa Ltda.".
pub fn company_name<R: Rng>(rng: &mut R) -> String {
    let first: &str = pick(rng, LAST_NAMES);
    let second: &str = pick(rng, LAST_NAMES);
    let suffix: &str = pick(rng, COMPANY_SUFFIXES);
    if first == second {
        format!("{first} {suffix}")
    } else {
        format!("{first} {second} {suffix}")
    }
}

/// A date between January 1st of the decade containing `today` and `today`.
pub fn date_this_decade<R: Rng>(rng: &mut R, today: Date) -> Date {
    let year: i32 = today.year() - today.year().rem_euclid(10);
    let start: i32 = Date::from_calendar_date(year, Month::January, 1)
        .map_or_else(|_| today.to_julian_day(), Date::to_julian_day);
    let end: i32 = today.to_julian_day().max(start);
    let day: i32 = rng.random_range(start..=end);
    Date::from_julian_day(day).unwrap_or(today)
}
