//! Voice Context - Catalog

use std::collections::HashSet;

use super::{Voice, VoiceError, VoiceId};

/// 音色目录 - 有序的 Voice 集合
///
/// 不变量:
/// - `id` 在目录内唯一
/// - `character` 在目录内唯一（作为外部元数据的连接键）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<Voice>) -> Result<Self, VoiceError> {
        let mut ids = HashSet::new();
        let mut characters = HashSet::new();

        for voice in &voices {
            if !ids.insert(voice.id().clone()) {
                return Err(VoiceError::DuplicateId(voice.id().clone()));
            }
            if !characters.insert(voice.character()) {
                return Err(VoiceError::DuplicateCharacter(voice.character().to_string()));
            }
        }

        Ok(Self { voices })
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Voice> {
        self.voices.iter_mut()
    }

    pub fn get(&self, id: &VoiceId) -> Option<&Voice> {
        self.voices.iter().find(|v| v.id() == id)
    }

    pub fn get_mut(&mut self, id: &VoiceId) -> Option<&mut Voice> {
        self.voices.iter_mut().find(|v| v.id() == id)
    }

    pub fn find_by_character(&self, character: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.character() == character)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::LanguageCode;

    fn voice(id: &str, character: &str) -> Voice {
        Voice::new(
            VoiceId::new(id).unwrap(),
            character,
            format!("pv-{}", id),
            LanguageCode::new("en").unwrap(),
        )
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = VoiceCatalog::new(vec![voice("b", "Bea"), voice("a", "Ada")]).unwrap();
        let ids: Vec<_> = catalog.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(catalog.find_by_character("Ada").is_some());
        assert!(catalog.find_by_character("ada").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = VoiceCatalog::new(vec![voice("a", "Ada"), voice("a", "Bea")]);
        assert!(matches!(result, Err(VoiceError::DuplicateId(_))));
    }

    #[test]
    fn test_duplicate_character_rejected() {
        let result = VoiceCatalog::new(vec![voice("a", "Ada"), voice("b", "Ada")]);
        assert!(matches!(result, Err(VoiceError::DuplicateCharacter(name)) if name == "Ada"));
    }
}
