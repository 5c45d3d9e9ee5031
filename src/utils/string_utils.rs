use serde::Deserialize;

/// 양쪽 공백을 제거하고, 빈 문자열은 `None`으로 정리합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with`용. 공백뿐인 값은 필드가 없는 것으로 처리합니다.
///
/// 필드 자체가 빠질 수 있으면 `#[serde(default)]`와 함께 사용해야 합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 로그인 식별자 정규화. 이메일 형태(`@` 포함)는 소문자로 맞춥니다.
pub fn normalize_identifier(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.contains('@') {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// URL slug 생성. ASCII 영숫자만 남기고 나머지 연속 구간은 하이픈 하나로 바꿉니다.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
