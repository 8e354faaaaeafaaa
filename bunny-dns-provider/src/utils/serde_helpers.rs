//! Serde 反序列化辅助
//!
//! bunny.net 的 API 会把未设置的字符串/列表字段返回为 `null`，
//! external-dns 也会把空列表编码为 `null`。这里统一把 `null` 视为类型默认值。

use serde::{Deserialize, Deserializer};

/// 反序列化：`null` 或缺失 -> `T::default()`
///
/// 需要配合 `#[serde(default)]` 使用，以覆盖字段缺失的情况。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// 序列化跳过条件：ID 类字段为 0 时不发送
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<u8>,
        #[serde(default, deserialize_with = "null_as_default")]
        number: i64,
    }

    #[test]
    fn null_becomes_default() {
        let h: Holder =
            serde_json::from_str(r#"{"text":null,"items":null,"number":null}"#).unwrap();
        assert!(h.text.is_empty());
        assert!(h.items.is_empty());
        assert_eq!(h.number, 0);
    }

    #[test]
    fn missing_becomes_default() {
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.text.is_empty());
        assert_eq!(h.number, 0);
    }

    #[test]
    fn present_values_kept() {
        let h: Holder =
            serde_json::from_str(r#"{"text":"abc","items":[1,2],"number":7}"#).unwrap();
        assert_eq!(h.text, "abc");
        assert_eq!(h.items, vec![1, 2]);
        assert_eq!(h.number, 7);
    }
}
