use crate::document::DocumentRecord;
use crate::ingest::policy::{DEFAULT_YOUTUBE_URL, THUMBNAIL_TEMPLATE};
use crate::types::identifiers::RecordId;

/// Scripts compiled into the crate. They always take precedence over
/// persisted copies with the same id.
pub fn sample_scripts() -> Vec<DocumentRecord> {
    vec![
        sample(
            "1",
            "比特币 2026：超级周期理论",
            "2024-05-12",
            "btc",
            &["比特币", "宏观", "预测"],
            "分析四年减半周期，以及为什么 2026 年可能是下一个超级周期的顶峰。",
            "# 比特币 2026：超级周期理论

## 简介
欢迎回到 CryptoFuture2026。今天我们讨论**超级周期理论**。四年周期已经消亡了吗？还是它只是在进化？

## 数据分析
观察链上指标，我们看到长期持有者供应出现了分歧。

*   **指标 A**：供应冲击即将来临。
*   **指标 B**：ETF 流入正在趋于稳定。

> \"历史不会重复，但往往会押韵。\" - 马克·吐温

## 结论
不要被震仓出局。未来是去中心化的。",
        ),
        sample(
            "2",
            "AI 代理：下一个万亿级叙事",
            "2024-05-20",
            "ai",
            &["AI", "山寨币", "科技"],
            "为什么区块链上的自主 AI 代理是这十年最大的机会。",
            "# AI 代理：下一个万亿级叙事

## 交汇点
AI 需要资金。加密货币是可编程资金。这是天作之合。

## 关键项目
1.  **Project Alpha**：去中心化算力。
2.  **Project Beta**：代理对代理的小额支付。

### 策略
定投那些支持代理集群高吞吐量的 Layer 1 项目。",
        ),
        sample(
            "3",
            "法币的消亡：CBDC 对决 稳定币",
            "2024-06-01",
            "fiat",
            &["经济", "稳定币", "监管"],
            "深度剖析未来货币的控制权之战。",
            "# 法币的消亡：CBDC 对决 稳定币

## 控制权之战
央行数字货币 (CBDC) 代表着全面的监控。稳定币代表中间地带，但真正的自由在于去中心化资产。

## 时间线
*   **2024**：监管框架建立。
*   **2025**：主要的 G7 CBDC 试点。
*   **2026**：作为对抗通胀的手段，私人稳定币将被大规模采用。

## 最终思考
掌握私钥，掌控你的未来。",
        ),
    ]
}

fn sample(
    id: &str,
    title: &str,
    date: &str,
    seed: &str,
    tags: &[&str],
    summary: &str,
    content: &str,
) -> DocumentRecord {
    DocumentRecord {
        id: RecordId::new(id),
        title: title.into(),
        date: date.into(),
        thumbnail_url: THUMBNAIL_TEMPLATE.replace("{seed}", seed),
        youtube_url: DEFAULT_YOUTUBE_URL.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        summary: summary.into(),
        content: content.into(),
    }
}
