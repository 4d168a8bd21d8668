// BrokenSignal - 壊れたウィジェット検出の一回限りの通知
//
// 最初の raise だけが状態を遷移させる。2回目以降は何もしない。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 複数ワーカーから共有される検出フラグ
#[derive(Debug, Clone, Default)]
pub struct BrokenSignal {
    inner: Arc<BrokenSignalInner>,
}

#[derive(Debug, Default)]
struct BrokenSignalInner {
    raised: AtomicBool,
    raises: AtomicUsize,
    notify: CancellationToken,
}

impl BrokenSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// フラグを立てる。最初の呼び出しだけが `true` を返す
    pub fn raise(&self) -> bool {
        let won = self
            .inner
            .raised
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.inner.raises.fetch_add(1, Ordering::Relaxed);
            self.inner.notify.cancel();
        }
        won
    }

    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    /// 実際に遷移した回数（0か1）
    pub fn raise_count(&self) -> usize {
        self.inner.raises.load(Ordering::Relaxed)
    }

    /// フラグが立つまで待機
    pub async fn wait(&self) {
        self.inner.notify.cancelled().await;
    }
}
