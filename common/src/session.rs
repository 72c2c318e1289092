//! 画面セッションの状態管理
//!
//! 選択画像・エラー・判定結果の3つを保持し、フロントエンドからの操作で遷移する。
//! エラーと結果は同時に設定されない。

use crate::error::SessionError;
use crate::preview::Preview;
use crate::types::{FileMeta, ResultLabel, SelectedImage};
use crate::upload::validate_upload;

/// 実行中の判定を識別するチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionTicket {
    seq: u64,
}

/// 1タブ(1プロセス)分のセッション状態
#[derive(Debug, Default)]
pub struct Session {
    image: Option<SelectedImage>,
    error: Option<SessionError>,
    result: Option<ResultLabel>,
    in_flight: Option<DetectionTicket>,
    is_dragging: bool,
    next_image_id: u64,
    next_seq: u64,
    input_epoch: u64,
    released: Vec<Preview>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.image.as_ref().and_then(|image| image.preview.as_ref())
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// 画面に出すエラーメッセージ
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn result(&self) -> Option<&ResultLabel> {
        self.result.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_detecting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 「Detect Signal」ボタンを押せるか
    pub fn can_detect(&self) -> bool {
        self.image.is_some() && self.in_flight.is_none()
    }

    /// ファイル入力欄の世代。リセットごとに進む
    pub fn input_epoch(&self) -> u64 {
        self.input_epoch
    }

    /// ファイルを選択する
    ///
    /// 受理した場合は新しい画像IDを返す。プレビューは `attach_preview` で後から渡す。
    /// 不正なファイルの場合は既存の選択も破棄してエラーを設定する。
    /// ファイルが渡されなかった場合はエラーのみで、選択中の画像は残す。
    pub fn submit_file(&mut self, file: Option<FileMeta>) -> Result<u64, SessionError> {
        let file = match validate_upload(file) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("upload rejected: {:?}", err);
                if matches!(err, SessionError::InvalidFileType(_)) {
                    self.discard_image();
                }
                self.result = None;
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        self.discard_image();
        self.next_image_id += 1;
        let id = self.next_image_id;
        log::debug!("image selected: id={} name={} type={}", id, file.name, file.content_type);
        self.image = Some(SelectedImage {
            id,
            file,
            preview: None,
        });
        self.error = None;
        self.result = None;
        Ok(id)
    }

    /// プレビューを選択中の画像に結び付ける
    ///
    /// 既に別の画像に差し替わっていた場合は解放キューに回して `false` を返す。
    pub fn attach_preview(&mut self, image_id: u64, preview: Preview) -> bool {
        match self.image.as_mut() {
            Some(image) if image.id == image_id => {
                if let Some(old) = image.preview.replace(preview) {
                    self.released.push(old);
                }
                true
            }
            _ => {
                log::debug!("stale preview for image {} released", image_id);
                self.released.push(preview);
                false
            }
        }
    }

    pub fn drag_enter(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    /// ドロップされたファイルを受け取る。空なら何もしない
    pub fn drop_files(&mut self, files: Vec<FileMeta>) -> Option<Result<u64, SessionError>> {
        self.is_dragging = false;
        let file = files.into_iter().next()?;
        Some(self.submit_file(Some(file)))
    }

    /// 判定を開始する
    ///
    /// 画像が無い場合はエラーを設定する。実行中の二重起動は状態を変えずに拒否する。
    pub fn begin_detection(&mut self) -> Result<DetectionTicket, SessionError> {
        if self.in_flight.is_some() {
            log::warn!("detection already in flight");
            return Err(SessionError::DetectionInFlight);
        }
        let Some(image_id) = self.image.as_ref().map(|image| image.id) else {
            self.result = None;
            self.error = Some(SessionError::NoImageSelected);
            return Err(SessionError::NoImageSelected);
        };

        self.next_seq += 1;
        let ticket = DetectionTicket { seq: self.next_seq };
        self.in_flight = Some(ticket);
        self.error = None;
        self.result = None;
        log::debug!("detection started: {:?} for image {}", ticket, image_id);
        Ok(ticket)
    }

    /// 判定を完了する
    ///
    /// リセットや画像の差し替えで古くなったチケットは無視して `false` を返す。
    pub fn complete_detection(
        &mut self,
        ticket: DetectionTicket,
        outcome: Result<ResultLabel, String>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            log::debug!("stale detection result dropped: {:?}", ticket);
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(label) => {
                log::debug!("detection finished: {}", label);
                self.error = None;
                self.result = Some(label);
            }
            Err(cause) => {
                log::warn!("detection failed: {}", cause);
                self.result = None;
                self.error = Some(SessionError::DetectionFailure(cause));
            }
        }
        true
    }

    /// 全状態を初期化する
    pub fn reset(&mut self) {
        self.discard_image();
        self.error = None;
        self.result = None;
        self.in_flight = None;
        self.is_dragging = false;
        self.input_epoch += 1;
    }

    /// 解放待ちのプレビューを取り出す
    pub fn take_released(&mut self) -> Vec<Preview> {
        std::mem::take(&mut self.released)
    }

    fn discard_image(&mut self) {
        if let Some(image) = self.image.take() {
            if let Some(preview) = image.preview {
                self.released.push(preview);
            }
        }
        self.in_flight = None;
    }
}
