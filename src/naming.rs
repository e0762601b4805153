/// Turn a raw catalog identifier into a PascalCase component name.
///
/// Digit runs are spelled out in English words first ("3d_rotation" becomes
/// "ThreeDRotation"), then segments split on `/` and tokens split on `_` are
/// capitalized and joined. `/` separators survive so hierarchical icon names
/// keep their hierarchy.
pub fn normalize(raw: &str) -> String {
    let expanded = numbers_to_words(raw);
    let pascal = to_pascal_case(&expanded);
    pascal.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Replace every maximal run of decimal digits with its spelled-out form.
///
/// Runs longer than three digits are converted in three-digit groups from
/// the left, so the result stays deterministic for arbitrarily long runs.
pub fn numbers_to_words(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut after_digits = false;

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut run = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    run.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            for group in digit_groups(&run) {
                result.push_str(&three_digit_words(group));
            }
            // A digit run ends a token: "3d" spells "ThreeD", not "Threed".
            after_digits = true;
        } else {
            if after_digits && c.is_alphabetic() {
                result.extend(c.to_uppercase());
            } else {
                result.push(c);
            }
            after_digits = false;
            chars.next();
        }
    }

    result
}

/// Split a digit run into numeric groups of at most three digits, left to right.
fn digit_groups(run: &str) -> Vec<u32> {
    run.as_bytes()
        .chunks(3)
        .map(|chunk| {
            // Chunks are 1-3 ASCII digits, so this parse cannot fail.
            std::str::from_utf8(chunk)
                .unwrap_or("0")
                .parse::<u32>()
                .unwrap_or(0)
        })
        .collect()
}

const ONES: [&str; 10] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spell out a number in 0..=999 with hundreds/tens/ones composition.
///
/// 10-19 use the irregular teen words; spelling "13" as "OneThree" would
/// collide with the separate digits "1" and "3".
fn three_digit_words(num: u32) -> String {
    if num == 0 {
        return ONES[0].to_string();
    }

    let mut result = String::new();
    let hundreds = (num / 100) as usize;
    let remainder = num % 100;

    if hundreds > 0 {
        result.push_str(ONES[hundreds]);
        result.push_str("Hundred");
    }

    if remainder > 0 {
        if remainder < 10 {
            result.push_str(ONES[remainder as usize]);
        } else if remainder < 20 {
            result.push_str(TEENS[(remainder - 10) as usize]);
        } else {
            result.push_str(TENS[(remainder / 10) as usize]);
            if remainder % 10 > 0 {
                result.push_str(ONES[(remainder % 10) as usize]);
            }
        }
    }

    result
}

/// Capitalize underscore-separated tokens within each `/`-separated segment.
fn to_pascal_case(input: &str) -> String {
    input
        .split('/')
        .map(|segment| {
            segment
                .split('_')
                .map(capitalize)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
