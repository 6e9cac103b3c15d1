/// Slug used when a name contains nothing URL-safe.
const FALLBACK_SLUG: &str = "project";

/// Derive a lowercase, URL-safe slug from a project name.
///
/// ASCII letters and digits are kept. Accented Latin and Cyrillic letters are
/// transliterated. Runs of whitespace and separator punctuation collapse to a
/// single `-`. Anything else (CJK included) is dropped, so names written only
/// in other scripts share the fallback slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let mut buf = [0u8; 4];
        let piece = if c.is_ascii_alphanumeric() {
            &*c.encode_utf8(&mut buf)
        } else if let Some(ascii) = transliterate(c) {
            ascii
        } else {
            if c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/' | '+' | '&') {
                pending_dash = true;
            }
            continue;
        };
        if piece.is_empty() {
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push_str(piece);
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// ASCII spelling of a lowercase letter outside ASCII, if one is known.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' | 'ŕ' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' | 'щ' => "sh",
        'ы' => "y",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(ascii)
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(slugify("Website Redesign"), "website-redesign");
        assert_eq!(slugify("  Q3   Roadmap  "), "q3-roadmap");
    }

    #[test]
    fn separators_collapse_and_punctuation_drops() {
        assert_eq!(slugify("R&D / Ops"), "r-d-ops");
        assert_eq!(slugify("v2.0_release--plan"), "v2-0-release-plan");
        assert_eq!(slugify("What's next?!"), "whats-next");
    }

    #[test]
    fn accented_and_cyrillic_letters_transliterate() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Straße Über"), "strasse-uber");
        assert_eq!(slugify("Проект"), "proekt");
        assert_eq!(slugify("Объём работ"), "obyom-rabot");
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(slugify("計画"), "project");
        assert_eq!(slugify("???"), "project");
        assert_eq!(slugify(""), "project");
    }
}
