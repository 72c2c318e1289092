//! ブラウザのFile APIとの橋渡し

use signal_id_common::{FileMeta, Preview};
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList, FileReader, Url};

/// File からセッション用のファイル情報を作る
pub fn file_meta(file: &File) -> FileMeta {
    FileMeta::new(file.name(), file.type_(), file.size() as u64)
}

/// FileList を Vec に変換する
pub fn files_from_list(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// オブジェクトURLでプレビューを作る（同期）
pub fn object_url_preview(file: &File) -> Result<Preview, JsValue> {
    Url::create_object_url_with_blob(file).map(Preview::ObjectUrl)
}

/// FileReader で Data URL を読み込む（非同期）
pub fn read_data_url_preview<F>(file: &File, on_done: F) -> Result<(), JsValue>
where
    F: FnOnce(Result<Preview, String>) + 'static,
{
    let reader = FileReader::new()?;
    let reader_clone = reader.clone();

    let closure = Closure::once(move |_: web_sys::ProgressEvent| {
        let outcome = reader_clone
            .result()
            .ok()
            .and_then(|result| result.as_string())
            .map(Preview::DataUri)
            .ok_or_else(|| "FileReader returned no data URL".to_string());
        on_done(outcome);
    });

    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    reader.read_as_data_url(file)
}

/// 不要になったプレビューを解放する
pub fn release_preview(preview: &Preview) {
    if let Preview::ObjectUrl(url) = preview {
        if let Err(err) = Url::revoke_object_url(url) {
            log::warn!("revokeObjectURL failed: {:?}", err);
        }
    }
}
