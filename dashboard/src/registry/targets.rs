//! 監視対象レジストリ
//!
//! 起動時に設定から構築され、以後は変更されない。
//! 対象の追加・削除にはプロセスの再起動が必要（数十件規模の運用を想定）。

use integration_dashboard_common::error::DashboardError;
use integration_dashboard_common::types::Target;
use std::collections::HashMap;
use tracing::info;

/// 監視対象レジストリ
///
/// 設定順を保持した対象リストと、名前による索引を持つ。
/// 名前の重複は構築時に拒否する（曖昧なキーを許さない）。
#[derive(Debug)]
pub struct TargetRegistry {
    /// 設定順の対象リスト
    targets: Vec<Target>,
    /// 名前→リスト位置の索引
    index: HashMap<String, usize>,
}

impl TargetRegistry {
    /// 設定から監視対象レジストリを構築する
    ///
    /// 同名の対象が2件以上ある場合は `DuplicateTarget` で起動を中止する。
    pub fn from_configs(targets: Vec<Target>) -> Result<Self, DashboardError> {
        let mut index = HashMap::with_capacity(targets.len());

        for (position, target) in targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                return Err(DashboardError::Config(
                    "target name must not be empty".to_string(),
                ));
            }
            if index.insert(target.name.clone(), position).is_some() {
                return Err(DashboardError::DuplicateTarget(target.name.clone()));
            }
        }

        info!(target_count = targets.len(), "Target registry initialized");

        Ok(Self { targets, index })
    }

    /// すべての監視対象を設定順で取得
    pub fn list(&self) -> &[Target] {
        &self.targets
    }

    /// 名前で監視対象を取得
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&position| &self.targets[position])
    }

    /// 指定した名前の対象が登録されているか
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 監視対象数を取得
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// 監視対象が1件もないか
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
