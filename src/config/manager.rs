//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    WikiSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: WikiSettings,

    /// Wiki のルートパス
    wiki_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: WikiSettings::default(), wiki_root: None }
    }

    /// 設定を読み込む
    ///
    /// 相対パスのディレクトリは `wiki_root` 基準に解決される。
    ///
    /// # Arguments
    /// * `wiki_root` - Wiki のルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, wiki_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for wiki: {:?}", wiki_root);

        let settings = if let Some(root) = &wiki_root {
            loader::load_from_root(root)?
                .map_or_else(WikiSettings::default, |ws| {
                    tracing::debug!("Loaded wiki settings: {:?}", ws);
                    ws
                })
                .resolve_paths(root)
        } else {
            WikiSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.wiki_root = wiki_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: WikiSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = match &self.wiki_root {
            Some(root) => new_settings.resolve_paths(root),
            None => new_settings,
        };
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &WikiSettings {
        &self.current_settings
    }

    /// Wiki ルートを取得
    #[must_use]
    pub fn wiki_root(&self) -> Option<&Path> {
        self.wiki_root.as_deref()
    }
}
