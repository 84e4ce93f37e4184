use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

/// BERT encoder with attention-masked mean pooling (sentence-transformers style).
pub struct BertSentenceEncoder {
    bert: BertModel,
    hidden_size: usize,
}

impl BertSentenceEncoder {
    /// Loads `config.json` + `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb = unsafe {
            candle_nn::VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)?
        };

        // sentence-transformers exports omit the `bert.` prefix, HF exports keep it.
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            bert,
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns pooled sentence embeddings, shape `[batch, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        mean_pool(&hidden, attention_mask)
    }
}

/// Averages token states over positions where `attention_mask` is 1.
fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    // hidden: [batch, seq, hidden], mask: [batch, seq] -> [batch, seq, 1]
    let mask = attention_mask.to_dtype(hidden.dtype())?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?;
    summed.broadcast_div(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_pool_ignores_masked_positions() {
        let device = Device::Cpu;
        let hidden = Tensor::new(&[[[1.0f32, 2.0], [3.0, 4.0], [100.0, 100.0]]], &device).unwrap();
        let mask = Tensor::new(&[[1u32, 1, 0]], &device).unwrap();

        let pooled = mean_pool(&hidden, &mask).unwrap();

        assert_eq!(pooled.dims(), &[1, 2]);
        let values = pooled.squeeze(0).unwrap().to_vec1::<f32>().unwrap();
        assert_eq!(values, vec![2.0, 3.0]);
    }
}
